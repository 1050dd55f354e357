//! Render configuration.
//!
//! Every option is an enumerated field; the configuration is immutable once
//! a job has been created.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Immutable per-job render configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Extra timeline padding after the last scene, in milliseconds.
    pub padding_back_ms: u32,
    /// Mood tag used to select the background music track.
    pub music_mood: MusicMood,
    /// Vertical placement of caption cues.
    pub caption_position: CaptionPosition,
    /// Caption background color as a hex string, e.g. `#000000`.
    pub caption_background_color: String,
    /// Narration voice.
    pub voice: Voice,
    /// Output orientation; also constrains stock footage selection.
    pub orientation: Orientation,
    /// Background music loudness.
    pub music_volume: MusicVolume,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            padding_back_ms: 0,
            music_mood: MusicMood::Chill,
            caption_position: CaptionPosition::Bottom,
            caption_background_color: "#000000".to_string(),
            voice: Voice::AfHeart,
            orientation: Orientation::Portrait,
            music_volume: MusicVolume::High,
        }
    }
}

/// Categorical mood tag for background music selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MusicMood {
    Sad,
    Melancholic,
    Happy,
    Euphoric,
    Excited,
    Chill,
    Uneasy,
    Angry,
    Dark,
    Hopeful,
    Contemplative,
    Funny,
}

impl MusicMood {
    /// All known mood tags, for the catalog endpoint.
    pub const ALL: &'static [MusicMood] = &[
        MusicMood::Sad,
        MusicMood::Melancholic,
        MusicMood::Happy,
        MusicMood::Euphoric,
        MusicMood::Excited,
        MusicMood::Chill,
        MusicMood::Uneasy,
        MusicMood::Angry,
        MusicMood::Dark,
        MusicMood::Hopeful,
        MusicMood::Contemplative,
        MusicMood::Funny,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MusicMood::Sad => "sad",
            MusicMood::Melancholic => "melancholic",
            MusicMood::Happy => "happy",
            MusicMood::Euphoric => "euphoric",
            MusicMood::Excited => "excited",
            MusicMood::Chill => "chill",
            MusicMood::Uneasy => "uneasy",
            MusicMood::Angry => "angry",
            MusicMood::Dark => "dark",
            MusicMood::Hopeful => "hopeful",
            MusicMood::Contemplative => "contemplative",
            MusicMood::Funny => "funny",
        }
    }
}

impl fmt::Display for MusicMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MusicMood {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|m| m.as_str() == s.to_lowercase())
            .copied()
            .ok_or_else(|| EnumParseError("music mood", s.to_string()))
    }
}

/// Vertical caption placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaptionPosition {
    Top,
    Center,
    #[default]
    Bottom,
}

impl CaptionPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptionPosition::Top => "top",
            CaptionPosition::Center => "center",
            CaptionPosition::Bottom => "bottom",
        }
    }
}

/// Narration voice identifiers, as exposed by the local speech service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Voice {
    AfHeart,
    AfBella,
    AfNicole,
    AfSky,
    AmAdam,
    AmMichael,
    BfEmma,
    BmGeorge,
}

impl Voice {
    /// All known voices, for the catalog endpoint.
    pub const ALL: &'static [Voice] = &[
        Voice::AfHeart,
        Voice::AfBella,
        Voice::AfNicole,
        Voice::AfSky,
        Voice::AmAdam,
        Voice::AmMichael,
        Voice::BfEmma,
        Voice::BmGeorge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::AfHeart => "af_heart",
            Voice::AfBella => "af_bella",
            Voice::AfNicole => "af_nicole",
            Voice::AfSky => "af_sky",
            Voice::AmAdam => "am_adam",
            Voice::AmMichael => "am_michael",
            Voice::BfEmma => "bf_emma",
            Voice::BmGeorge => "bm_george",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output orientation. Also used to classify stock footage candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
    Square,
}

impl Orientation {
    /// Output dimensions in pixels (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Orientation::Portrait => (1080, 1920),
            Orientation::Landscape => (1920, 1080),
            Orientation::Square => (1080, 1080),
        }
    }

    /// Classify an asset's width/height ratio.
    pub fn of(width: u32, height: u32) -> Orientation {
        use std::cmp::Ordering;
        match width.cmp(&height) {
            Ordering::Less => Orientation::Portrait,
            Ordering::Greater => Orientation::Landscape,
            Ordering::Equal => Orientation::Square,
        }
    }

    /// Whether an asset with the given dimensions matches this orientation.
    pub fn matches(&self, width: u32, height: u32) -> bool {
        Self::of(width, height) == *self
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
            Orientation::Square => "square",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Background music loudness relative to narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MusicVolume {
    Muted,
    Low,
    #[default]
    High,
}

impl MusicVolume {
    pub fn as_str(&self) -> &'static str {
        match self {
            MusicVolume::Muted => "muted",
            MusicVolume::Low => "low",
            MusicVolume::High => "high",
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown {0}: {1}")]
pub struct EnumParseError(&'static str, String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_classification() {
        assert_eq!(Orientation::of(1080, 1920), Orientation::Portrait);
        assert_eq!(Orientation::of(1920, 1080), Orientation::Landscape);
        assert_eq!(Orientation::of(720, 720), Orientation::Square);
        assert!(Orientation::Portrait.matches(720, 1280));
        assert!(!Orientation::Portrait.matches(1280, 720));
    }

    #[test]
    fn test_mood_round_trip() {
        for mood in MusicMood::ALL {
            assert_eq!(mood.as_str().parse::<MusicMood>().unwrap(), *mood);
        }
        assert!("polka".parse::<MusicMood>().is_err());
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: RenderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.padding_back_ms, 0);
        assert_eq!(config.orientation, Orientation::Portrait);
        assert_eq!(config.caption_position, CaptionPosition::Bottom);

        let config: RenderConfig =
            serde_json::from_str(r#"{"paddingBackMs": 1500, "musicMood": "dark"}"#).unwrap();
        assert_eq!(config.padding_back_ms, 1500);
        assert_eq!(config.music_mood, MusicMood::Dark);
    }
}
