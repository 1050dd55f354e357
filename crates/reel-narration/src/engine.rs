//! Engine traits for the local speech and alignment services.

use async_trait::async_trait;

use reel_models::{NarrationAudio, Voice, WordTiming};

use crate::error::NarrationResult;

/// Synthesizes narration audio for a piece of text.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    async fn synthesize(&self, text: &str, voice: Voice) -> NarrationResult<NarrationAudio>;
}

/// Produces word-level timings for an audio/text pair.
#[async_trait]
pub trait AlignmentEngine: Send + Sync {
    async fn align(&self, audio: &[u8], text: &str) -> NarrationResult<Vec<WordTiming>>;
}
