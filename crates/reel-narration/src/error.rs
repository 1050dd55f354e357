//! Narration error types.

use thiserror::Error;

pub type NarrationResult<T> = Result<T, NarrationError>;

#[derive(Debug, Error)]
pub enum NarrationError {
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Word alignment failed: {0}")]
    Alignment(String),

    #[error("Narration service unreachable: {0}")]
    Network(#[from] reqwest::Error),
}

impl NarrationError {
    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    pub fn alignment(msg: impl Into<String>) -> Self {
        Self::Alignment(msg.into())
    }
}
