//! Music selection error types.

use thiserror::Error;

use reel_models::MusicMood;

pub type MusicResult<T> = Result<T, MusicError>;

#[derive(Debug, Error)]
pub enum MusicError {
    /// No track is indexed under the requested mood.
    #[error("No music track found for mood '{0}'")]
    NotFound(MusicMood),

    #[error("Failed to load music manifest: {0}")]
    Manifest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MusicError {
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }
}
