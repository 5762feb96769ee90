use std::io;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the overlay and its collaborators.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// The drawing surface failed.
    #[error("render: {0}")]
    Render(String),
    /// The external command could not be run.
    #[error("command: {0}")]
    Command(String),
    /// A jump could not be performed.
    #[error("jump: {0}")]
    Jump(String),
    /// Configuration could not be loaded.
    #[error("config: {0}")]
    Config(String),
    /// Input could not be parsed.
    #[error("parse: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Render(e.to_string())
    }
}
