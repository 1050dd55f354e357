//! Shared data models for the ReelForge backend.
//!
//! This crate provides Serde-serializable types for:
//! - Videos (jobs) and their lifecycle status
//! - Scene inputs and resolved per-scene assets
//! - Render configuration enums
//! - The fully-resolved render specification

pub mod config;
pub mod music;
pub mod scene;
pub mod spec;
pub mod video;

// Re-export common types
pub use config::{CaptionPosition, MusicMood, MusicVolume, Orientation, RenderConfig, Voice};
pub use music::MusicTrack;
pub use scene::{
    Caption, NarrationAudio, ResolvedScene, SceneInput, StockVideoAsset, WordTiming,
};
pub use spec::{RenderSpec, SpecScene};
pub use video::{CreateVideoRequest, Video, VideoId, VideoStatus};
