//! Per-job cancellation token.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One token per job, threaded through every pipeline stage.
///
/// Each stage checks the token before starting; a set token surfaces as
/// `PipelineError::Cancelled` rather than relying on implicit task
/// cancellation mid-stage.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
