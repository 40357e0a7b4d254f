//! Error types for the remote store layer.

use thiserror::Error;

/// Result type for remote store operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors that can occur in remote store operations.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Network error reaching the store.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the store.
    #[error("remote store returned status {code}: {body}")]
    Status { code: u16, body: String },

    /// Serialization error on a payload or response.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response shape did not match the store protocol.
    #[error("protocol error: {0}")]
    Protocol(String),
}
