pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod keys;
pub mod navigator;
pub mod render;

pub use cursor::CursorState;
pub use dispatch::{DispatchLoop, LoopExit, LoopState};
pub use error::EngineError;
pub use input::{Capture, KeySource, ScriptedKeys, TerminalKeys};
pub use keys::{Key, KeyEvent};
pub use navigator::transition;
pub use render::{HighlightStyle, Renderer};
