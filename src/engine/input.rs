use std::collections::VecDeque;
use std::io::{self, IsTerminal, Read};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::engine::error::EngineError;
use crate::engine::keys::{KEY_EVENT_LEN, Key, KeyEvent};

/// Result of one blocking capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capture {
    Key(KeyEvent),
    /// The input stream is closed; nobody is left to press keys.
    Closed,
}

/// Anything that can block until the next key press.
pub trait KeySource {
    fn capture_key(&mut self) -> Result<Capture, EngineError>;
}

/// Holds the terminal in raw mode until dropped.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn acquire() -> Result<Self, EngineError> {
        if let Err(e) = enable_raw_mode() {
            // Partial acquisition can leave termios modified.
            let _ = disable_raw_mode();
            return Err(EngineError::RawMode(e));
        }
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::error!("failed to restore terminal mode: {e}");
        }
    }
}

/// Reads key presses from the controlling terminal on stdin.
pub struct TerminalKeys<R = io::Stdin> {
    input: R,
}

impl TerminalKeys {
    /// Fails fast when stdin is a pipe or file instead of blocking on it.
    pub fn stdin() -> Result<Self, EngineError> {
        let input = io::stdin();
        if !input.is_terminal() {
            return Err(EngineError::NotATerminal);
        }
        Ok(Self { input })
    }
}

impl<R: Read> KeySource for TerminalKeys<R> {
    fn capture_key(&mut self) -> Result<Capture, EngineError> {
        let _raw = RawModeGuard::acquire()?;
        Ok(read_capture(&mut self.input))
    }
}

/// One read of up to `KEY_EVENT_LEN` bytes. Read errors become an empty
/// (unrecognized) event; zero bytes means the stream is closed.
pub fn read_capture<R: Read>(input: &mut R) -> Capture {
    let mut buf = [0u8; KEY_EVENT_LEN];
    match input.read(&mut buf) {
        Ok(0) => Capture::Closed,
        Ok(n) => Capture::Key(KeyEvent::from_bytes(&buf[..n])),
        Err(e) => {
            tracing::warn!("key read failed, treating as unrecognized: {e}");
            Capture::Key(KeyEvent::EMPTY)
        }
    }
}

/// Replays a fixed list of captures, then reports the input as closed.
/// Used to drive the loop without a terminal.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    captures: VecDeque<Capture>,
}

impl ScriptedKeys {
    pub fn new(captures: impl IntoIterator<Item = Capture>) -> Self {
        Self {
            captures: captures.into_iter().collect(),
        }
    }

    pub fn from_keys(keys: &[Key]) -> Self {
        Self::new(
            keys.iter()
                .map(|k| Capture::Key(KeyEvent::from_bytes(k.sequence()))),
        )
    }

    pub fn remaining(&self) -> usize {
        self.captures.len()
    }
}

impl KeySource for ScriptedKeys {
    fn capture_key(&mut self) -> Result<Capture, EngineError> {
        Ok(self.captures.pop_front().unwrap_or(Capture::Closed))
    }
}
