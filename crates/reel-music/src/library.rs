//! Local music track library.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use reel_models::{MusicMood, MusicTrack};

use crate::error::{MusicError, MusicResult};

/// Configuration for the music library.
#[derive(Debug, Clone)]
pub struct MusicLibraryConfig {
    /// Directory holding the audio files and the `manifest.json` index.
    pub music_dir: PathBuf,
}

impl Default for MusicLibraryConfig {
    fn default() -> Self {
        Self {
            music_dir: PathBuf::from("static/music"),
        }
    }
}

impl MusicLibraryConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            music_dir: std::env::var("MUSIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static/music")),
        }
    }
}

/// One entry in `manifest.json`.
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    file: String,
    mood: MusicMood,
    duration_s: f64,
}

/// Read-only index of background music tracks, keyed by mood.
pub struct MusicLibrary {
    tracks: Vec<MusicTrack>,
}

impl MusicLibrary {
    /// Build a library from an explicit track list.
    pub fn new(tracks: Vec<MusicTrack>) -> Self {
        Self { tracks }
    }

    /// Load the library from the manifest in `music_dir`.
    pub fn load(config: &MusicLibraryConfig) -> MusicResult<Self> {
        let manifest_path = config.music_dir.join("manifest.json");
        let raw = std::fs::read_to_string(&manifest_path).map_err(|e| {
            MusicError::manifest(format!("{}: {}", manifest_path.display(), e))
        })?;
        let entries: Vec<ManifestEntry> =
            serde_json::from_str(&raw).map_err(|e| MusicError::manifest(e.to_string()))?;

        let tracks = entries
            .into_iter()
            .map(|e| MusicTrack {
                file: config.music_dir.join(e.file),
                mood: e.mood,
                duration_s: e.duration_s,
            })
            .collect::<Vec<_>>();

        info!("Loaded {} music tracks from {}", tracks.len(), config.music_dir.display());
        Ok(Self { tracks })
    }

    /// Select a track for the requested mood that covers
    /// `min_duration_s` of narration.
    ///
    /// Picks the shortest track that covers the duration, minimizing how
    /// much the render backend has to loop; when no track is long enough,
    /// falls back to the longest track for the mood and lets the backend
    /// loop it. Fails only when the mood has no tracks at all.
    pub fn select(&self, mood: MusicMood, min_duration_s: f64) -> MusicResult<MusicTrack> {
        let mut candidates: Vec<&MusicTrack> =
            self.tracks.iter().filter(|t| t.mood == mood).collect();

        if candidates.is_empty() {
            return Err(MusicError::NotFound(mood));
        }

        candidates.sort_by(|a, b| {
            a.duration_s
                .partial_cmp(&b.duration_s)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // `candidates` is non-empty, so `last()` always yields a track.
        let track = candidates
            .iter()
            .find(|t| t.covers(min_duration_s))
            .or_else(|| candidates.last())
            .copied()
            .cloned()
            .ok_or(MusicError::NotFound(mood))?;
        debug!(
            "Selected '{}' ({:.1}s) for mood {} needing {:.1}s",
            track.file.display(),
            track.duration_s,
            mood,
            min_duration_s
        );
        Ok(track)
    }

    /// Number of indexed tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn track(name: &str, mood: MusicMood, duration_s: f64) -> MusicTrack {
        MusicTrack {
            file: PathBuf::from(name),
            mood,
            duration_s,
        }
    }

    fn library() -> MusicLibrary {
        MusicLibrary::new(vec![
            track("chill-long.mp3", MusicMood::Chill, 180.0),
            track("chill-short.mp3", MusicMood::Chill, 45.0),
            track("dark.mp3", MusicMood::Dark, 60.0),
        ])
    }

    #[test]
    fn test_picks_shortest_covering_track() {
        let selected = library().select(MusicMood::Chill, 30.0).unwrap();
        assert_eq!(selected.file, Path::new("chill-short.mp3"));
    }

    #[test]
    fn test_falls_back_to_longest_when_none_cover() {
        let selected = library().select(MusicMood::Chill, 600.0).unwrap();
        assert_eq!(selected.file, Path::new("chill-long.mp3"));
        assert!(!selected.covers(600.0));
    }

    #[test]
    fn test_unknown_mood_fails() {
        let result = library().select(MusicMood::Euphoric, 10.0);
        assert!(matches!(result, Err(MusicError::NotFound(_))));
    }

    #[test]
    fn test_selection_is_deterministic() {
        let lib = library();
        let a = lib.select(MusicMood::Chill, 50.0).unwrap();
        let b = lib.select(MusicMood::Chill, 50.0).unwrap();
        assert_eq!(a.file, b.file);
    }

    #[test]
    fn test_load_from_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = std::fs::File::create(dir.path().join("manifest.json")).unwrap();
        manifest
            .write_all(
                br#"[{"file": "sunny.mp3", "mood": "happy", "duration_s": 120.5}]"#,
            )
            .unwrap();

        let lib = MusicLibrary::load(&MusicLibraryConfig {
            music_dir: dir.path().to_path_buf(),
        })
        .unwrap();

        assert_eq!(lib.len(), 1);
        let selected = lib.select(MusicMood::Happy, 60.0).unwrap();
        assert_eq!(selected.file, dir.path().join("sunny.mp3"));
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let result = MusicLibrary::load(&MusicLibraryConfig {
            music_dir: dir.path().to_path_buf(),
        });
        assert!(matches!(result, Err(MusicError::Manifest(_))));
    }
}
