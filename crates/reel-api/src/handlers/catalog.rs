//! Catalog handlers: the voices and music moods a request may pick from.

use axum::Json;

use reel_models::{MusicMood, Voice};

/// List the available narration voices.
pub async fn list_voices() -> Json<Vec<&'static str>> {
    Json(Voice::ALL.iter().map(|v| v.as_str()).collect())
}

/// List the available music moods.
pub async fn list_music_tags() -> Json<Vec<&'static str>> {
    Json(MusicMood::ALL.iter().map(|m| m.as_str()).collect())
}
