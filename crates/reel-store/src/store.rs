//! In-memory job store with disk-backed output artifacts.

use std::collections::HashMap;
use std::path::PathBuf;

use tokio::sync::{mpsc, Mutex, RwLock};
use tracing::{info, warn};

use reel_models::{CreateVideoRequest, Video, VideoId, VideoStatus};

use crate::error::{StoreError, StoreResult};

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding one rendered artifact per job id.
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/videos"),
        }
    }
}

impl StoreConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/videos")),
        }
    }
}

/// Job store: records, lifecycle state and the FIFO queue.
///
/// All status writes for a given job happen from the single worker task;
/// API-facing reads are snapshot clones of an already-consistent record.
pub struct JobStore {
    config: StoreConfig,
    videos: RwLock<HashMap<VideoId, Video>>,
    queue_tx: mpsc::UnboundedSender<VideoId>,
    queue_rx: Mutex<mpsc::UnboundedReceiver<VideoId>>,
}

impl JobStore {
    /// Create the store, ensuring the data directory exists.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        Ok(Self {
            config,
            videos: RwLock::new(HashMap::new()),
            queue_tx,
            queue_rx: Mutex::new(queue_rx),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> StoreResult<Self> {
        Self::new(StoreConfig::from_env())
    }

    /// Where the rendered artifact for a job lives.
    pub fn output_path(&self, id: &VideoId) -> PathBuf {
        self.config.data_dir.join(format!("{}.mp4", id))
    }

    // ========================================================================
    // API-facing operations
    // ========================================================================

    /// Create a queued job from a validated request and enqueue it.
    ///
    /// Returns immediately; pipeline work happens on the worker task.
    pub async fn create(&self, request: CreateVideoRequest) -> StoreResult<Video> {
        let video = Video::from_request(request);
        let id = video.id.clone();

        self.videos.write().await.insert(id.clone(), video.clone());
        self.queue_tx
            .send(id.clone())
            .map_err(|_| StoreError::QueueClosed)?;

        info!("Enqueued video {}", id);
        Ok(video)
    }

    /// Snapshot of one job record.
    pub async fn get(&self, id: &VideoId) -> StoreResult<Video> {
        self.videos
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id.as_str()))
    }

    /// Snapshots of all job records, newest first.
    pub async fn list(&self) -> Vec<Video> {
        let mut videos: Vec<Video> = self.videos.read().await.values().cloned().collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        videos
    }

    /// Delete a job record and its output artifact.
    ///
    /// Rejected with `Conflict` while the job is processing. A repeated
    /// delete finds no record and reports `NotFound`.
    pub async fn delete(&self, id: &VideoId) -> StoreResult<()> {
        let removed = {
            let mut videos = self.videos.write().await;
            match videos.get(id) {
                None => return Err(StoreError::not_found(id.as_str())),
                Some(v) if v.status == VideoStatus::Processing => {
                    return Err(StoreError::conflict(id.as_str()))
                }
                Some(_) => videos.remove(id),
            }
        };

        if let Some(video) = removed {
            if let Some(output) = video.output_file {
                match tokio::fs::remove_file(&output).await {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        warn!("Output for {} already missing: {}", id, output.display());
                    }
                    Err(e) => return Err(StoreError::Io(e)),
                }
            }
            info!("Deleted video {}", id);
        }
        Ok(())
    }

    // ========================================================================
    // Worker-facing operations
    // ========================================================================

    /// Wait for the next queued job id, FIFO by enqueue time.
    ///
    /// Returns `None` once all senders are gone (shutdown).
    pub async fn dequeue(&self) -> Option<VideoId> {
        self.queue_rx.lock().await.recv().await
    }

    /// Flip a queued job to processing.
    pub async fn mark_processing(&self, id: &VideoId) -> StoreResult<Video> {
        self.transition(id, VideoStatus::Queued, VideoStatus::Processing, |v| v.start())
            .await
    }

    /// Record the rendered output and flip the job to ready.
    pub async fn mark_ready(&self, id: &VideoId, output_file: PathBuf) -> StoreResult<Video> {
        self.transition(id, VideoStatus::Processing, VideoStatus::Ready, move |v| {
            v.complete(output_file)
        })
        .await
    }

    /// Record the pipeline error and flip the job to failed.
    pub async fn mark_failed(&self, id: &VideoId, error: impl Into<String>) -> StoreResult<Video> {
        let error = error.into();
        self.transition(id, VideoStatus::Processing, VideoStatus::Failed, move |v| {
            v.fail(error)
        })
        .await
    }

    async fn transition(
        &self,
        id: &VideoId,
        expected: VideoStatus,
        target: VideoStatus,
        apply: impl FnOnce(Video) -> Video,
    ) -> StoreResult<Video> {
        let mut videos = self.videos.write().await;
        let video = videos
            .get(id)
            .ok_or_else(|| StoreError::not_found(id.as_str()))?;

        if video.status != expected {
            return Err(StoreError::InvalidTransition {
                id: id.to_string(),
                from: video.status.as_str(),
                to: target.as_str(),
            });
        }

        let updated = apply(video.clone());
        videos.insert(id.clone(), updated.clone());
        Ok(updated)
    }
}
