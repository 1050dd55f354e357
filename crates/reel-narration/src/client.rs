//! HTTP clients for the local speech and alignment services.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use reel_models::{NarrationAudio, Voice, WordTiming};

use crate::engine::{AlignmentEngine, SpeechEngine};
use crate::error::{NarrationError, NarrationResult};

/// Configuration for the speech/alignment service clients.
///
/// Both services are local single-instance models; the generous default
/// timeout accounts for model warm-up on the first request.
#[derive(Debug, Clone)]
pub struct SpeechServiceConfig {
    /// Base URL of the service.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for SpeechServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8801".to_string(),
            timeout: Duration::from_secs(300),
        }
    }
}

impl SpeechServiceConfig {
    /// Create config from environment variables, given the URL variable name
    /// (`SPEECH_SERVICE_URL` or `ALIGNMENT_SERVICE_URL`).
    pub fn from_env(url_var: &str, default_url: &str) -> Self {
        Self {
            base_url: std::env::var(url_var).unwrap_or_else(|_| default_url.to_string()),
            timeout: Duration::from_secs(
                std::env::var("SPEECH_SERVICE_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
        }
    }
}

// ============================================================================
// Speech synthesis
// ============================================================================

/// Client for the narration synthesis service.
pub struct SpeechClient {
    http: Client,
    config: SpeechServiceConfig,
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    voice: Voice,
}

impl SpeechClient {
    pub fn new(config: SpeechServiceConfig) -> NarrationResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(NarrationError::Network)?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> NarrationResult<Self> {
        Self::new(SpeechServiceConfig::from_env(
            "SPEECH_SERVICE_URL",
            "http://localhost:8801",
        ))
    }
}

#[async_trait]
impl SpeechEngine for SpeechClient {
    async fn synthesize(&self, text: &str, voice: Voice) -> NarrationResult<NarrationAudio> {
        let url = format!("{}/synthesize", self.config.base_url);
        debug!("Synthesizing {} chars with voice {}", text.len(), voice);

        let response = self
            .http
            .post(&url)
            .json(&SynthesizeRequest { text, voice })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NarrationError::synthesis(format!(
                "speech service returned {}: {}",
                status, body
            )));
        }

        let audio: NarrationAudio = response.json().await?;
        if audio.bytes.is_empty() || audio.duration_ms == 0 {
            return Err(NarrationError::synthesis("speech service returned empty audio"));
        }
        Ok(audio)
    }
}

// ============================================================================
// Word alignment
// ============================================================================

/// Client for the word-level alignment service.
pub struct AlignmentClient {
    http: Client,
    config: SpeechServiceConfig,
}

#[derive(Debug, Serialize)]
struct AlignRequest<'a> {
    /// Audio bytes, base64-encoded by the shared model's serializer.
    audio: AudioPayload<'a>,
    text: &'a str,
}

/// Borrowed wrapper so the audio payload reuses the base64 encoding of
/// `NarrationAudio` without cloning the buffer.
#[derive(Debug)]
struct AudioPayload<'a>(&'a [u8]);

impl serde::Serialize for AudioPayload<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;
        serializer.serialize_str(&STANDARD.encode(self.0))
    }
}

#[derive(Debug, Deserialize)]
struct AlignResponse {
    #[serde(default)]
    words: Vec<WordTiming>,
}

impl AlignmentClient {
    pub fn new(config: SpeechServiceConfig) -> NarrationResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(NarrationError::Network)?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> NarrationResult<Self> {
        Self::new(SpeechServiceConfig::from_env(
            "ALIGNMENT_SERVICE_URL",
            "http://localhost:8802",
        ))
    }
}

#[async_trait]
impl AlignmentEngine for AlignmentClient {
    async fn align(&self, audio: &[u8], text: &str) -> NarrationResult<Vec<WordTiming>> {
        let url = format!("{}/align", self.config.base_url);
        debug!("Aligning {} audio bytes against {} chars", audio.len(), text.len());

        let response = self
            .http
            .post(&url)
            .json(&AlignRequest {
                audio: AudioPayload(audio),
                text,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NarrationError::alignment(format!(
                "alignment service returned {}: {}",
                status, body
            )));
        }

        let aligned: AlignResponse = response.json().await?;
        Ok(aligned.words)
    }
}
