//! Worker configuration.

use std::time::Duration;

/// Worker configuration.
///
/// Concurrency defaults to 1: the render backend spins up a dedicated
/// rendering process and the speech/alignment engines are single-instance
/// local models, so jobs are processed strictly in submission order.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Maximum concurrent jobs.
    pub max_concurrent_jobs: usize,
    /// Per-call deadline for stock footage provider queries.
    pub query_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: 1,
            query_timeout: reel_stock::DEFAULT_QUERY_TIMEOUT,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_concurrent_jobs: std::env::var("WORKER_MAX_JOBS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
            query_timeout: Duration::from_millis(
                std::env::var("STOCK_QUERY_TIMEOUT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(reel_stock::DEFAULT_QUERY_TIMEOUT.as_millis() as u64),
            ),
        }
    }
}
