//! Error types for filetree.

use thiserror::Error;

/// Common error type for filetree.
#[derive(Error, Debug)]
pub enum FileTreeError {
    /// Database error.
    ///
    /// Wraps any failure reported by the storage engine.
    /// Errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for FileTreeError {
    fn from(e: sqlx::Error) -> Self {
        FileTreeError::Database(e.to_string())
    }
}

/// Result type alias for filetree operations.
pub type Result<T> = std::result::Result<T, FileTreeError>;
