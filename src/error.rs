//! Error types for number-guess.

use thiserror::Error;

/// Main error type for number-guess operations.
#[derive(Error, Debug)]
pub enum GuessError {
    /// Request parameters failed a shape or range constraint.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Token was never issued, has expired, or was already consumed.
    #[error("unknown or expired token")]
    UnknownOrExpiredToken,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GuessError {
    /// Whether the error was caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::UnknownOrExpiredToken)
    }
}

impl From<crate::game::ValidationError> for GuessError {
    fn from(e: crate::game::ValidationError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

/// Convenience Result type for number-guess operations.
pub type Result<T> = std::result::Result<T, GuessError>;
