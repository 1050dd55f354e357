//! Scene inputs and the per-scene assets resolved during processing.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One narrated segment of the final video, as submitted by the client.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SceneInput {
    /// Narration text for this scene.
    #[validate(length(min = 1, message = "scene text must not be empty"))]
    pub text: String,

    /// Search terms used to find background footage, tried in order.
    #[validate(length(min = 1, message = "at least one search term is required"))]
    pub search_terms: Vec<String>,
}

/// Synthesized narration audio for one scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrationAudio {
    /// Encoded audio bytes as returned by the speech service.
    #[serde(with = "serde_bytes_base64")]
    pub bytes: Vec<u8>,
    /// Total audio duration in milliseconds.
    pub duration_ms: u64,
}

impl NarrationAudio {
    /// Audio duration in seconds.
    pub fn duration_s(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }
}

/// Word-level timing from the alignment service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordTiming {
    pub word: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

/// A timed caption cue shown during playback.
///
/// Cues for one scene are ordered by `start_ms`, pairwise non-overlapping,
/// and the final cue ends no later than the scene's audio duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Caption {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

/// A background footage clip sourced from the stock provider.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StockVideoAsset {
    /// Provider-side asset id, used to avoid reuse within one job.
    pub id: u64,
    /// Direct download URL for the selected file.
    pub url: String,
    pub width_px: u32,
    pub height_px: u32,
    /// Clip duration in seconds; always covers the scene's narration.
    pub duration_s: f64,
}

/// A scene with all of its assets resolved by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedScene {
    pub text: String,
    pub search_terms: Vec<String>,
    pub audio: NarrationAudio,
    pub captions: Vec<Caption>,
    pub video: StockVideoAsset,
}

/// Base64 representation for audio byte payloads in JSON.
mod serde_bytes_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_scene_input_validation() {
        let scene = SceneInput {
            text: "A dog runs on the beach.".to_string(),
            search_terms: vec!["dog beach".to_string()],
        };
        assert!(scene.validate().is_ok());

        let empty_text = SceneInput {
            text: String::new(),
            search_terms: vec!["dog".to_string()],
        };
        assert!(empty_text.validate().is_err());

        let no_terms = SceneInput {
            text: "text".to_string(),
            search_terms: vec![],
        };
        assert!(no_terms.validate().is_err());
    }

    #[test]
    fn test_narration_audio_serde() {
        let audio = NarrationAudio {
            bytes: vec![1, 2, 3, 4, 5],
            duration_ms: 2400,
        };
        let json = serde_json::to_string(&audio).unwrap();
        let back: NarrationAudio = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bytes, audio.bytes);
        assert_eq!(back.duration_ms, 2400);
        assert!((back.duration_s() - 2.4).abs() < f64::EPSILON);
    }
}
