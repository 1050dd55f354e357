//! Narration resolution.
//!
//! Turns scene text into narration audio plus timed caption cues. Synthesis
//! and word-level alignment are external local services behind the
//! [`SpeechEngine`] and [`AlignmentEngine`] traits; caption grouping is a
//! pure function of the word timings. Neither service call is retried — a
//! failure fails the scene, and with it the job.

pub mod captions;
pub mod client;
pub mod engine;
pub mod error;
pub mod resolver;

pub use captions::{group_captions, MAX_CUE_DURATION_MS, MAX_WORDS_PER_CUE};
pub use client::{AlignmentClient, SpeechClient, SpeechServiceConfig};
pub use engine::{AlignmentEngine, SpeechEngine};
pub use error::{NarrationError, NarrationResult};
pub use resolver::{NarrationResolver, ResolvedNarration};
