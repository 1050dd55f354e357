//! Narration resolution for one scene.

use std::sync::Arc;

use tracing::debug;

use reel_models::{Caption, NarrationAudio, Voice};

use crate::captions::group_captions;
use crate::engine::{AlignmentEngine, SpeechEngine};
use crate::error::NarrationResult;

/// Narration audio plus derived caption cues for one scene.
#[derive(Debug, Clone)]
pub struct ResolvedNarration {
    pub audio: NarrationAudio,
    pub captions: Vec<Caption>,
}

/// Synthesizes narration and derives caption cues from word timings.
pub struct NarrationResolver {
    speech: Arc<dyn SpeechEngine>,
    alignment: Arc<dyn AlignmentEngine>,
}

impl NarrationResolver {
    pub fn new(speech: Arc<dyn SpeechEngine>, alignment: Arc<dyn AlignmentEngine>) -> Self {
        Self { speech, alignment }
    }

    /// Resolve narration for one scene's text.
    ///
    /// Synthesis and alignment failures propagate immediately; these are
    /// local managed services, not flaky network calls, so there is no
    /// retry here.
    pub async fn resolve(&self, text: &str, voice: Voice) -> NarrationResult<ResolvedNarration> {
        let audio = self.speech.synthesize(text, voice).await?;
        debug!(
            "Synthesized {}ms of narration ({} bytes)",
            audio.duration_ms,
            audio.bytes.len()
        );

        let words = self.alignment.align(&audio.bytes, text).await?;
        let captions = group_captions(&words, audio.duration_ms);
        debug!("Derived {} caption cues from {} words", captions.len(), words.len());

        Ok(ResolvedNarration { audio, captions })
    }
}
