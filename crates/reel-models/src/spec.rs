//! The fully-resolved render specification.
//!
//! A `RenderSpec` is assembled once per job from the resolved scenes, the
//! selected music track and the render configuration. It carries no further
//! external dependency and is passed opaquely to the render backend.

use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::music::MusicTrack;
use crate::scene::{Caption, NarrationAudio, StockVideoAsset};

/// One scene on the final timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecScene {
    pub text: String,
    pub audio: NarrationAudio,
    pub captions: Vec<Caption>,
    pub video: StockVideoAsset,
    /// Absolute start offset on the timeline, in milliseconds.
    ///
    /// Running sum of the audio durations of all prior scenes.
    pub start_offset_ms: u64,
}

/// The complete, order-preserving render description for one job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSpec {
    pub scenes: Vec<SpecScene>,
    pub music: MusicTrack,
    pub config: RenderConfig,
    /// Total timeline duration: sum of scene audio durations plus the
    /// configured back padding.
    pub total_duration_ms: u64,
}

impl RenderSpec {
    /// Total narration duration in seconds, excluding back padding.
    pub fn narration_duration_s(&self) -> f64 {
        self.scenes
            .iter()
            .map(|s| s.audio.duration_ms as f64 / 1000.0)
            .sum()
    }
}
