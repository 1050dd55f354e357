//! Pipeline error types.

use thiserror::Error;

use crate::render::RenderError;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A resolved scene is missing an asset the spec builder requires.
    /// Unreachable when the stage ordering is respected.
    #[error("Invalid pipeline state: {0}")]
    Validation(String),

    #[error("Job cancelled")]
    Cancelled,

    #[error(transparent)]
    Stock(#[from] reel_stock::StockError),

    #[error(transparent)]
    Narration(#[from] reel_narration::NarrationError),

    #[error(transparent)]
    Music(#[from] reel_music::MusicError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Store error: {0}")]
    Store(#[from] reel_store::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
