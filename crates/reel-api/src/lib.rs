//! Axum HTTP API server.
//!
//! This crate provides:
//! - REST surface for creating, inspecting and deleting short-video jobs
//! - Catalog endpoints for the available voices and music moods
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
