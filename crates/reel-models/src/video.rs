//! Video (job) records and lifecycle status.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;
use validator::Validate;

use crate::config::RenderConfig;
use crate::scene::SceneInput;

/// Unique identifier for a video job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Generate a new random video ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a video job.
///
/// Transitions are exactly `Queued -> Processing -> {Ready | Failed}`;
/// no status is skipped or revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    /// Waiting in the queue
    #[default]
    Queued,
    /// The worker is running the pipeline for this job
    Processing,
    /// Rendered output is available
    Ready,
    /// Pipeline failed; `error` carries the message
    Failed,
}

impl VideoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoStatus::Queued => "queued",
            VideoStatus::Processing => "processing",
            VideoStatus::Ready => "ready",
            VideoStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoStatus::Ready | VideoStatus::Failed)
    }
}

impl fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for creating a new short video.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct CreateVideoRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[validate(length(min = 1, message = "at least one scene is required"))]
    #[validate(nested)]
    pub scenes: Vec<SceneInput>,

    #[serde(default)]
    pub config: RenderConfig,
}

/// One end-to-end video creation job and its lifecycle state.
///
/// Owned exclusively by the job store. Invariants: `output_file` is set if
/// and only if the status is `Ready`; `error` is set if and only if the
/// status is `Failed`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Video {
    /// Unique job ID
    pub id: VideoId,

    /// Lifecycle status
    #[serde(default)]
    pub status: VideoStatus,

    /// User-supplied title
    pub title: String,

    /// User-supplied description
    #[serde(default)]
    pub description: String,

    /// Immutable render configuration
    pub config: RenderConfig,

    /// Scene inputs, in playback order
    pub scenes: Vec<SceneInput>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Error message (set iff status is `Failed`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Path to the rendered output (set iff status is `Ready`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
}

impl Video {
    /// Create a new queued video job from a validated request.
    pub fn from_request(request: CreateVideoRequest) -> Self {
        Self {
            id: VideoId::new(),
            status: VideoStatus::Queued,
            title: request.title,
            description: request.description,
            config: request.config,
            scenes: request.scenes,
            created_at: Utc::now(),
            error: None,
            output_file: None,
        }
    }

    /// Start processing the job.
    pub fn start(mut self) -> Self {
        self.status = VideoStatus::Processing;
        self
    }

    /// Mark the job as ready with its rendered output.
    pub fn complete(mut self, output_file: PathBuf) -> Self {
        self.status = VideoStatus::Ready;
        self.output_file = Some(output_file);
        self.error = None;
        self
    }

    /// Mark the job as failed.
    pub fn fail(mut self, error: impl Into<String>) -> Self {
        self.status = VideoStatus::Failed;
        self.error = Some(error.into());
        self.output_file = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneInput;

    fn request() -> CreateVideoRequest {
        CreateVideoRequest {
            title: "Morning routine".to_string(),
            description: String::new(),
            scenes: vec![SceneInput {
                text: "Start the day with a walk.".to_string(),
                search_terms: vec!["sunrise walk".to_string()],
            }],
            config: RenderConfig::default(),
        }
    }

    #[test]
    fn test_video_creation() {
        let video = Video::from_request(request());
        assert_eq!(video.status, VideoStatus::Queued);
        assert!(video.error.is_none());
        assert!(video.output_file.is_none());
    }

    #[test]
    fn test_status_transitions() {
        let video = Video::from_request(request());

        let started = video.start();
        assert_eq!(started.status, VideoStatus::Processing);
        assert!(!started.status.is_terminal());

        let completed = started.clone().complete(PathBuf::from("/data/out.mp4"));
        assert_eq!(completed.status, VideoStatus::Ready);
        assert!(completed.output_file.is_some());
        assert!(completed.error.is_none());

        let failed = started.fail("no footage found");
        assert_eq!(failed.status, VideoStatus::Failed);
        assert!(failed.output_file.is_none());
        assert_eq!(failed.error.as_deref(), Some("no footage found"));
    }

    #[test]
    fn test_request_validation() {
        use validator::Validate;

        let mut req = request();
        assert!(req.validate().is_ok());

        req.scenes.clear();
        assert!(req.validate().is_err());

        let mut req = request();
        req.title = String::new();
        assert!(req.validate().is_err());
    }
}
