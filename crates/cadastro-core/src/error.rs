//! Error types for cadastro-core.

use thiserror::Error;

/// Result type alias using cadastro-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for registry operations
#[derive(Error, Debug)]
pub enum Error {
    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Request payload rejected before any write
    #[error("{0}")]
    Validation(String),
}

impl Error {
    /// Create a validation error with a caller-facing message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
