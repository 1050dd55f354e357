//! Footage selection: per-term queries, retry discipline, filtering.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use reel_models::{Orientation, StockVideoAsset};

use crate::error::{StockError, StockResult};

/// Default per-query deadline.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Total attempts per provider query, including the first one. Only
/// timeout-classified failures are retried, with no delay between attempts.
pub const MAX_QUERY_ATTEMPTS: u32 = 3;

/// Executes one provider query for one search term.
///
/// Implementations must classify deadline overruns as [`StockError::Timeout`]
/// so the selector can apply its retry policy; every other failure is
/// surfaced as-is and fails the job.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, term: &str, timeout: Duration) -> StockResult<Vec<StockVideoAsset>>;
}

/// Resolves one stock footage asset per scene.
pub struct StockSelector {
    backend: Arc<dyn SearchBackend>,
    max_attempts: u32,
}

impl StockSelector {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            max_attempts: MAX_QUERY_ATTEMPTS,
        }
    }

    /// Override the per-query attempt cap.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Find one asset matching the scene requirements.
    ///
    /// Search terms are tried in order; the first term that yields a
    /// qualifying asset short-circuits the rest. An asset qualifies when its
    /// orientation matches, its duration covers `min_duration_s`, and its id
    /// is not in `exclude_ids` (prevents reusing footage within one job).
    pub async fn find_video(
        &self,
        search_terms: &[String],
        min_duration_s: f64,
        exclude_ids: &HashSet<u64>,
        orientation: Orientation,
        timeout: Duration,
    ) -> StockResult<StockVideoAsset> {
        for term in search_terms {
            let candidates = self.query_with_retry(term, timeout).await?;
            debug!("'{}' returned {} candidates", term, candidates.len());

            let asset = candidates.into_iter().find(|asset| {
                orientation.matches(asset.width_px, asset.height_px)
                    && asset.duration_s >= min_duration_s
                    && !exclude_ids.contains(&asset.id)
            });

            if let Some(asset) = asset {
                debug!("Selected asset {} for '{}'", asset.id, term);
                return Ok(asset);
            }
        }

        Err(StockError::not_found(format!(
            "no asset of at least {:.1}s matched terms {:?}",
            min_duration_s, search_terms
        )))
    }

    /// Run one provider query, retrying timeouts up to the attempt cap.
    async fn query_with_retry(
        &self,
        term: &str,
        timeout: Duration,
    ) -> StockResult<Vec<StockVideoAsset>> {
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match self.backend.search(term, timeout).await {
                Ok(candidates) => return Ok(candidates),
                Err(e) if e.is_timeout() && attempt < self.max_attempts => {
                    metrics::counter!("reel_stock_retries_total").increment(1);
                    warn!(
                        "Query '{}' timed out (attempt {}/{}), retrying",
                        term, attempt, self.max_attempts
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}
