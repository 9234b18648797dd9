//! Arrow-key menu for running cp-api maintenance commands from a terminal.
//!
//! The `engine` module holds the reusable part: key capture, the pure cursor
//! transition, the in-place renderer and the dispatch loop. `commands` binds
//! the concrete admin actions into a [`menu::Menu`].

pub mod commands;
pub mod config;
pub mod context;
pub mod engine;
pub mod logging;
pub mod menu;
pub mod output;
