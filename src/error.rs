//! Error types for parenlight

use thiserror::Error;

/// Result type alias for parenlight operations
pub type Result<T> = std::result::Result<T, ParenError>;

/// Error types
///
/// Match outcomes (matched, mismatched, nothing adjacent) are never errors;
/// they are reported through `MatchResult`.
#[derive(Error, Debug)]
pub enum ParenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Position {pos} is out of range for a buffer of length {len}")]
    InvalidPosition { pos: usize, len: usize },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Buffer is read-only")]
    ReadOnly,

    #[error("{0}")]
    Message(String),
}
