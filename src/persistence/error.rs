//! Error types for persistence

use thiserror::Error;

/// Errors reading or writing trainer data files
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;
