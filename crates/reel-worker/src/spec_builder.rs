//! Render spec assembly.
//!
//! Pure function over one job's resolved scenes, selected music track and
//! render configuration: identical resolved inputs always produce the same
//! spec.

use reel_models::{MusicTrack, RenderConfig, RenderSpec, ResolvedScene, SpecScene};

use crate::error::{PipelineError, PipelineResult};

/// Assemble the render spec for one job.
///
/// Per-scene start offsets are the running sum of prior scenes' audio
/// durations; the total timeline duration adds the configured back padding.
pub fn build_spec(
    scenes: Vec<ResolvedScene>,
    music: MusicTrack,
    config: RenderConfig,
) -> PipelineResult<RenderSpec> {
    if scenes.is_empty() {
        return Err(PipelineError::validation("no resolved scenes"));
    }

    let mut spec_scenes = Vec::with_capacity(scenes.len());
    let mut offset_ms: u64 = 0;

    for (index, scene) in scenes.into_iter().enumerate() {
        if scene.audio.bytes.is_empty() || scene.audio.duration_ms == 0 {
            return Err(PipelineError::validation(format!(
                "scene {} has no resolved narration audio",
                index
            )));
        }
        if scene.video.url.is_empty() {
            return Err(PipelineError::validation(format!(
                "scene {} has no resolved video asset",
                index
            )));
        }

        let duration_ms = scene.audio.duration_ms;
        spec_scenes.push(SpecScene {
            text: scene.text,
            audio: scene.audio,
            captions: scene.captions,
            video: scene.video,
            start_offset_ms: offset_ms,
        });
        offset_ms += duration_ms;
    }

    Ok(RenderSpec {
        scenes: spec_scenes,
        music,
        total_duration_ms: offset_ms + u64::from(config.padding_back_ms),
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_models::{MusicMood, NarrationAudio, StockVideoAsset};
    use std::path::PathBuf;

    fn scene(duration_ms: u64, asset_id: u64) -> ResolvedScene {
        ResolvedScene {
            text: format!("scene narrated for {}ms", duration_ms),
            search_terms: vec!["nature".to_string()],
            audio: NarrationAudio {
                bytes: vec![0u8; 8],
                duration_ms,
            },
            captions: vec![],
            video: StockVideoAsset {
                id: asset_id,
                url: format!("https://example.com/{}.mp4", asset_id),
                width_px: 1080,
                height_px: 1920,
                duration_s: duration_ms as f64 / 1000.0 + 5.0,
            },
        }
    }

    fn music() -> MusicTrack {
        MusicTrack {
            file: PathBuf::from("chill.mp3"),
            mood: MusicMood::Chill,
            duration_s: 120.0,
        }
    }

    #[test]
    fn test_offsets_and_total_duration() {
        let config = RenderConfig {
            padding_back_ms: 1500,
            ..RenderConfig::default()
        };
        let spec =
            build_spec(vec![scene(2000, 1), scene(3500, 2), scene(1000, 3)], music(), config)
                .unwrap();

        assert_eq!(spec.scenes.len(), 3);
        assert_eq!(spec.scenes[0].start_offset_ms, 0);
        assert_eq!(spec.scenes[1].start_offset_ms, 2000);
        assert_eq!(spec.scenes[2].start_offset_ms, 5500);
        assert_eq!(spec.total_duration_ms, 2000 + 3500 + 1000 + 1500);
    }

    #[test]
    fn test_reproducible_for_identical_inputs() {
        let build = || {
            build_spec(
                vec![scene(2400, 1), scene(1600, 2)],
                music(),
                RenderConfig::default(),
            )
            .unwrap()
        };
        let a = build();
        let b = build();
        assert_eq!(a.total_duration_ms, b.total_duration_ms);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_rejects_missing_audio() {
        let mut bad = scene(2000, 1);
        bad.audio.bytes.clear();
        let result = build_spec(vec![bad], music(), RenderConfig::default());
        assert!(matches!(result, Err(PipelineError::Validation(_))));
    }

    #[test]
    fn test_rejects_missing_video_url() {
        let mut bad = scene(2000, 1);
        bad.video.url.clear();
        let result = build_spec(vec![bad], music(), RenderConfig::default());
        assert!(matches!(result, Err(PipelineError::Validation(_))));
    }

    #[test]
    fn test_rejects_empty_scene_list() {
        let result = build_spec(vec![], music(), RenderConfig::default());
        assert!(matches!(result, Err(PipelineError::Validation(_))));
    }
}
