use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("standard input is not an interactive terminal")]
    NotATerminal,

    #[error("failed to enter raw terminal mode: {0}")]
    RawMode(#[source] io::Error),

    #[error("failed to write menu to terminal: {0}")]
    Output(#[from] io::Error),
}
