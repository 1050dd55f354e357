//! Application state.

use std::sync::Arc;

use reel_store::JobStore;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<JobStore>,
}

impl AppState {
    pub fn new(config: ApiConfig, store: Arc<JobStore>) -> Self {
        Self { config, store }
    }
}
