//! Render backend client.
//!
//! The pixel-level compositing runs in an external render service; this
//! module only ships the fully-resolved spec over and streams the finished
//! MP4 back to the job's output path.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use reel_models::RenderSpec;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render backend failed: {0}")]
    Backend(String),

    #[error("Render backend unreachable: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Renders a spec into a finished video file.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, spec: &RenderSpec, output: &Path) -> Result<(), RenderError>;
}

/// Configuration for the HTTP render backend client.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Base URL of the render service.
    pub base_url: String,
    /// Request timeout. Rendering is slow; the default is generous.
    pub timeout: Duration,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8803".to_string(),
            timeout: Duration::from_secs(1800),
        }
    }
}

impl RendererConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("RENDER_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8803".to_string()),
            timeout: Duration::from_secs(
                std::env::var("RENDER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1800),
            ),
        }
    }
}

/// Client for the external render service.
pub struct HttpRenderer {
    http: Client,
    config: RendererConfig,
}

impl HttpRenderer {
    pub fn new(config: RendererConfig) -> Result<Self, RenderError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RenderError::Network)?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self, RenderError> {
        Self::new(RendererConfig::from_env())
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn render(&self, spec: &RenderSpec, output: &Path) -> Result<(), RenderError> {
        let url = format!("{}/render", self.config.base_url);
        debug!(
            "Rendering {} scenes ({}ms timeline) via {}",
            spec.scenes.len(),
            spec.total_duration_ms,
            url
        );

        let response = self.http.post(&url).json(spec).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RenderError::backend(format!(
                "render service returned {}: {}",
                status, body
            )));
        }

        let mut file = tokio::fs::File::create(output).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            written += chunk.len() as u64;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        info!("Wrote {} bytes to {}", written, output.display());
        Ok(())
    }
}
