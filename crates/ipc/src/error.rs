//! Errors for form/server message framing.

/// Raised when a message cannot be read from or written to JSON.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty message")]
    EmptyMessage,
}
