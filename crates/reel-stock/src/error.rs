//! Stock footage error types.

use thiserror::Error;

pub type StockResult<T> = Result<T, StockError>;

#[derive(Debug, Error)]
pub enum StockError {
    /// No search term yielded a qualifying asset.
    #[error("No qualifying stock footage found: {0}")]
    NotFound(String),

    /// A provider query exceeded its deadline, after exhausting retries.
    #[error("Stock footage search timed out: {0}")]
    Timeout(String),

    /// Non-timeout upstream failure. Never retried.
    #[error("Stock footage provider error: {0}")]
    Provider(String),
}

impl StockError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Timeout-classified failures are the only retryable kind.
    pub fn is_timeout(&self) -> bool {
        matches!(self, StockError::Timeout(_))
    }
}

impl From<reqwest::Error> for StockError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            StockError::Timeout(e.to_string())
        } else {
            StockError::Provider(e.to_string())
        }
    }
}
