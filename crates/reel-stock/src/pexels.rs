//! Pexels video search backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use reel_models::StockVideoAsset;

use crate::error::{StockError, StockResult};
use crate::selector::SearchBackend;

/// Configuration for the Pexels client.
#[derive(Debug, Clone)]
pub struct PexelsConfig {
    /// API key sent in the `Authorization` header.
    pub api_key: String,
    /// Base URL of the Pexels API.
    pub base_url: String,
    /// Number of results requested per query.
    pub per_page: u32,
}

impl PexelsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.pexels.com".to_string(),
            per_page: 25,
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> StockResult<Self> {
        let api_key = std::env::var("PEXELS_API_KEY")
            .map_err(|_| StockError::provider("PEXELS_API_KEY not set"))?;
        let mut config = Self::new(api_key);
        if let Ok(url) = std::env::var("PEXELS_BASE_URL") {
            config.base_url = url;
        }
        Ok(config)
    }

    /// Override the base URL (used by tests against a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Search backend talking to the Pexels video API.
pub struct PexelsBackend {
    http: Client,
    config: PexelsConfig,
}

impl PexelsBackend {
    pub fn new(config: PexelsConfig) -> StockResult<Self> {
        let http = Client::builder().build().map_err(StockError::from)?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> StockResult<Self> {
        Self::new(PexelsConfig::from_env()?)
    }
}

#[async_trait]
impl SearchBackend for PexelsBackend {
    async fn search(&self, term: &str, timeout: Duration) -> StockResult<Vec<StockVideoAsset>> {
        let url = format!("{}/videos/search", self.config.base_url);

        debug!("Querying Pexels for '{}'", term);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.config.api_key)
            .query(&[
                ("query", term),
                ("per_page", &self.config.per_page.to_string()),
            ])
            .timeout(timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Pexels returned {} for '{}'", status, term);
            return Err(StockError::provider(format!(
                "Pexels returned {}: {}",
                status, body
            )));
        }

        let search: SearchResponse = response.json().await?;
        Ok(search
            .videos
            .into_iter()
            .filter_map(flatten_video)
            .collect())
    }
}

/// Pick the download file for a provider video: prefer an HD rendition,
/// falling back to the widest file available.
fn flatten_video(video: PexelsVideo) -> Option<StockVideoAsset> {
    let file = video
        .video_files
        .iter()
        .find(|f| f.quality.as_deref() == Some("hd"))
        .or_else(|| video.video_files.iter().max_by_key(|f| f.width))?;

    Some(StockVideoAsset {
        id: video.id,
        url: file.link.clone(),
        width_px: if file.width > 0 { file.width } else { video.width },
        height_px: if file.height > 0 { file.height } else { video.height },
        duration_s: video.duration,
    })
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    videos: Vec<PexelsVideo>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideo {
    id: u64,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    video_files: Vec<PexelsVideoFile>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideoFile {
    #[serde(default)]
    quality: Option<String>,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_prefers_hd_file() {
        let video = PexelsVideo {
            id: 42,
            duration: 12.0,
            width: 1080,
            height: 1920,
            video_files: vec![
                PexelsVideoFile {
                    quality: Some("sd".to_string()),
                    width: 540,
                    height: 960,
                    link: "https://example.com/sd.mp4".to_string(),
                },
                PexelsVideoFile {
                    quality: Some("hd".to_string()),
                    width: 1080,
                    height: 1920,
                    link: "https://example.com/hd.mp4".to_string(),
                },
            ],
        };

        let asset = flatten_video(video).unwrap();
        assert_eq!(asset.url, "https://example.com/hd.mp4");
        assert_eq!(asset.width_px, 1080);
        assert_eq!(asset.height_px, 1920);
    }

    #[test]
    fn test_flatten_falls_back_to_widest() {
        let video = PexelsVideo {
            id: 7,
            duration: 5.0,
            width: 1920,
            height: 1080,
            video_files: vec![
                PexelsVideoFile {
                    quality: Some("sd".to_string()),
                    width: 640,
                    height: 360,
                    link: "https://example.com/small.mp4".to_string(),
                },
                PexelsVideoFile {
                    quality: Some("uhd".to_string()),
                    width: 3840,
                    height: 2160,
                    link: "https://example.com/large.mp4".to_string(),
                },
            ],
        };

        let asset = flatten_video(video).unwrap();
        assert_eq!(asset.url, "https://example.com/large.mp4");
    }

    #[test]
    fn test_flatten_without_files() {
        let video = PexelsVideo {
            id: 7,
            duration: 5.0,
            width: 1920,
            height: 1080,
            video_files: vec![],
        };
        assert!(flatten_video(video).is_none());
    }
}
