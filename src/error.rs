//! Classmate error types

use thiserror::Error;

/// Classmate error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required request field was missing or invalid
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upstream text generation failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// An operation did not complete in time
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Engine initialization failed
    #[error("Initialization error: {0}")]
    Init(String),

    /// Server lifecycle error
    #[error("Server error: {0}")]
    Server(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        Error::Timeout(err.to_string())
    }
}

/// Result type alias for Classmate operations
pub type Result<T> = std::result::Result<T, Error>;
