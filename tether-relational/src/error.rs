//! Error types for the relational layer.

use thiserror::Error;

/// Result type for relational store operations.
pub type RelationalResult<T> = Result<T, RelationalError>;

/// Errors that can occur in relational store operations.
#[derive(Debug, Error)]
pub enum RelationalError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization/deserialization error on the fields column.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Record not found.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Invalid row data.
    #[error("invalid data: {0}")]
    InvalidData(String),
}
