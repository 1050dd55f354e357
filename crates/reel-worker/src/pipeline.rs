//! The per-job processing pipeline.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use reel_models::{ResolvedScene, Video};
use reel_music::MusicLibrary;
use reel_narration::NarrationResolver;
use reel_stock::StockSelector;

use crate::cancel::CancelToken;
use crate::error::{PipelineError, PipelineResult};
use crate::render::Renderer;
use crate::spec_builder::build_spec;

/// Runs one job through all stages, in order:
/// narration -> footage (per scene) -> music -> spec -> render.
pub struct Pipeline {
    narration: NarrationResolver,
    stock: StockSelector,
    music: Arc<MusicLibrary>,
    renderer: Arc<dyn Renderer>,
    query_timeout: Duration,
}

impl Pipeline {
    pub fn new(
        narration: NarrationResolver,
        stock: StockSelector,
        music: Arc<MusicLibrary>,
        renderer: Arc<dyn Renderer>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            narration,
            stock,
            music,
            renderer,
            query_timeout,
        }
    }

    /// Process one job and write the rendered artifact to `output`.
    ///
    /// Scenes are resolved sequentially: the speech and alignment engines
    /// are single-instance local models. Any stage failure aborts the
    /// remaining stages. The cancel token is checked before each stage.
    pub async fn process(
        &self,
        video: &Video,
        cancel: &CancelToken,
        output: &Path,
    ) -> PipelineResult<()> {
        let config = &video.config;
        let mut resolved: Vec<ResolvedScene> = Vec::with_capacity(video.scenes.len());
        let mut used_asset_ids: HashSet<u64> = HashSet::new();

        for (index, scene) in video.scenes.iter().enumerate() {
            ensure_active(cancel)?;
            let narration = self.narration.resolve(&scene.text, config.voice).await?;
            debug!(
                "Scene {}/{}: narration {}ms, {} captions",
                index + 1,
                video.scenes.len(),
                narration.audio.duration_ms,
                narration.captions.len()
            );

            ensure_active(cancel)?;
            let footage = self
                .stock
                .find_video(
                    &scene.search_terms,
                    narration.audio.duration_s(),
                    &used_asset_ids,
                    config.orientation,
                    self.query_timeout,
                )
                .await?;
            used_asset_ids.insert(footage.id);

            resolved.push(ResolvedScene {
                text: scene.text.clone(),
                search_terms: scene.search_terms.clone(),
                audio: narration.audio,
                captions: narration.captions,
                video: footage,
            });
        }

        ensure_active(cancel)?;
        let narration_s: f64 = resolved.iter().map(|s| s.audio.duration_ms as f64 / 1000.0).sum();
        let music = self.music.select(config.music_mood, narration_s)?;

        let spec = build_spec(resolved, music, config.clone())?;

        ensure_active(cancel)?;
        self.renderer.render(&spec, output).await?;

        info!(
            "Rendered video {} ({} scenes, {}ms) to {}",
            video.id,
            spec.scenes.len(),
            spec.total_duration_ms,
            output.display()
        );
        Ok(())
    }
}

fn ensure_active(cancel: &CancelToken) -> PipelineResult<()> {
    if cancel.is_cancelled() {
        Err(PipelineError::Cancelled)
    } else {
        Ok(())
    }
}
