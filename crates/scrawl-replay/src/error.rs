use scrawl_core::{ConfigError, DocumentError};
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid session JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;
