//! Background music track metadata.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::MusicMood;

/// One track in the local music library.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MusicTrack {
    /// Path to the audio file on disk.
    pub file: PathBuf,
    /// Mood tag this track is indexed under.
    pub mood: MusicMood,
    /// Track duration in seconds. The render backend loops the track when
    /// it is shorter than the video timeline.
    pub duration_s: f64,
}

impl MusicTrack {
    /// Whether this track covers the given duration without looping.
    pub fn covers(&self, duration_s: f64) -> bool {
        self.duration_s >= duration_s
    }
}
