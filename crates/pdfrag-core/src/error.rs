//! Error types for the pdfrag system

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the pdfrag system
///
/// Generation failures carry distinct variants so callers can branch on the
/// failure class (unreachable backend vs. transport vs. malformed response)
/// instead of pattern-matching message strings.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("Vector index error: {0}")]
    VectorIndex(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Generation backend unreachable: {0}")]
    BackendUnavailable(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Generation backend error: {0}")]
    Backend(String),

    #[error("Response parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}
