//! Error types for respira.

use thiserror::Error;

/// Errors that can occur while running respira.
#[derive(Error, Debug)]
pub enum RespiraError {
    /// Configuration file or setting problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Audio device or stream problem.
    #[error("Audio error: {0}")]
    Audio(String),

    /// Terminal setup or rendering problem.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A named item (e.g. a technique) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
