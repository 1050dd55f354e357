//! Store error types.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Video not found: {0}")]
    NotFound(String),

    /// Deleting a job that the worker is actively processing.
    #[error("Video {0} is processing and cannot be deleted")]
    Conflict(String),

    /// A status update that would skip or revisit a lifecycle state.
    #[error("Invalid status transition for video {id}: {from} -> {to}")]
    InvalidTransition {
        id: String,
        from: &'static str,
        to: &'static str,
    },

    #[error("Queue closed")]
    QueueClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn conflict(id: impl Into<String>) -> Self {
        Self::Conflict(id.into())
    }
}
