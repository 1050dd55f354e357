//! Video job pipeline and worker loop.
//!
//! Pulls queued jobs from the store one at a time and drives each through
//! narration, footage and music resolution, render-spec assembly and the
//! external render backend. Every stage failure is caught at the job
//! boundary: a job always ends `ready` or `failed`, never stuck in
//! `processing`.

pub mod cancel;
pub mod config;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod render;
pub mod spec_builder;

pub use cancel::CancelToken;
pub use config::WorkerConfig;
pub use error::{PipelineError, PipelineResult};
pub use executor::Executor;
pub use pipeline::Pipeline;
pub use render::{HttpRenderer, RenderError, Renderer, RendererConfig};
pub use spec_builder::build_spec;
