//! Worker loop: dequeue, process, record the terminal state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{watch, Mutex, Semaphore};
use tracing::{debug, error, info, warn};

use reel_models::VideoId;
use reel_store::{JobStore, StoreError};

use crate::cancel::CancelToken;
use crate::config::WorkerConfig;
use crate::pipeline::Pipeline;

/// Pulls queued jobs from the store and runs the pipeline for each.
///
/// One permit per allowed concurrent job (default 1). Each job runs in its
/// own task so a panic is contained and recorded as a failed job; the store
/// never ends up with a record stuck in `processing`.
pub struct Executor {
    store: Arc<JobStore>,
    pipeline: Arc<Pipeline>,
    config: WorkerConfig,
    job_semaphore: Arc<Semaphore>,
    active: Arc<Mutex<HashMap<VideoId, CancelToken>>>,
    shutdown: watch::Sender<bool>,
}

impl Executor {
    pub fn new(store: Arc<JobStore>, pipeline: Pipeline, config: WorkerConfig) -> Self {
        let job_semaphore = Arc::new(Semaphore::new(config.max_concurrent_jobs.max(1)));
        let (shutdown, _) = watch::channel(false);
        Self {
            store,
            pipeline: Arc::new(pipeline),
            config,
            job_semaphore,
            active: Arc::new(Mutex::new(HashMap::new())),
            shutdown,
        }
    }

    /// Handle used to stop the loop and cancel the active job(s).
    pub fn shutdown_handle(&self) -> watch::Sender<bool> {
        self.shutdown.clone()
    }

    /// Run the worker loop until shutdown.
    pub async fn run(&self) {
        info!(
            "Starting worker loop with {} max concurrent jobs",
            self.config.max_concurrent_jobs
        );
        let mut shutdown_rx = self.shutdown.subscribe();

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Shutdown signal received, stopping worker loop");
                        break;
                    }
                }
                next = self.store.dequeue() => {
                    match next {
                        Some(id) => self.dispatch(id).await,
                        None => {
                            info!("Job queue closed, stopping worker loop");
                            break;
                        }
                    }
                }
            }
        }

        // Cancel whatever is still in flight; each job task records the
        // cancellation as its terminal state.
        for (id, token) in self.active.lock().await.iter() {
            warn!("Cancelling in-flight job {}", id);
            token.cancel();
        }

        // Wait for in-flight jobs to finish recording their state.
        let _ = self
            .job_semaphore
            .acquire_many(self.config.max_concurrent_jobs.max(1) as u32)
            .await;
        info!("Worker loop stopped");
    }

    /// Acquire a job slot and spawn the job task.
    ///
    /// With one permit this serializes jobs strictly in submission order:
    /// the next dequeue result is not dispatched until the previous job has
    /// reached a terminal state.
    async fn dispatch(&self, id: VideoId) {
        let permit = match self.job_semaphore.clone().acquire_owned().await {
            Ok(p) => p,
            Err(_) => return,
        };

        let cancel = CancelToken::new();
        self.active.lock().await.insert(id.clone(), cancel.clone());

        let store = Arc::clone(&self.store);
        let pipeline = Arc::clone(&self.pipeline);
        let active = Arc::clone(&self.active);

        tokio::spawn(async move {
            let _permit = permit;
            run_job(&store, &pipeline, &id, &cancel).await;
            active.lock().await.remove(&id);
        });
    }
}

/// Process one job end to end, always leaving it in a terminal state.
async fn run_job(store: &JobStore, pipeline: &Arc<Pipeline>, id: &VideoId, cancel: &CancelToken) {
    let video = match store.mark_processing(id).await {
        Ok(v) => v,
        Err(StoreError::NotFound(_)) => {
            // Deleted while still queued; nothing to do.
            debug!("Job {} vanished before processing", id);
            return;
        }
        Err(e) => {
            error!("Failed to start job {}: {}", id, e);
            return;
        }
    };

    info!("Processing video {} ({} scenes)", id, video.scenes.len());
    let output = store.output_path(id);

    // The pipeline runs in its own task so a panic in any stage is caught
    // and recorded instead of leaving the job stuck in processing.
    let pipeline = Arc::clone(pipeline);
    let job_video = video.clone();
    let job_cancel = cancel.clone();
    let job_output = output.clone();
    let outcome = tokio::spawn(async move {
        pipeline.process(&job_video, &job_cancel, &job_output).await
    })
    .await;

    match outcome {
        Ok(Ok(())) => {
            if let Err(e) = store.mark_ready(id, output).await {
                error!("Failed to record success for {}: {}", id, e);
                return;
            }
            metrics::counter!("reel_jobs_processed_total").increment(1);
            info!("Video {} is ready", id);
        }
        Ok(Err(pipeline_err)) => {
            fail_job(store, id, pipeline_err.to_string()).await;
        }
        Err(join_err) => {
            fail_job(store, id, format!("pipeline panicked: {}", join_err)).await;
        }
    }
}

async fn fail_job(store: &JobStore, id: &VideoId, message: String) {
    warn!("Video {} failed: {}", id, message);
    metrics::counter!("reel_jobs_failed_total").increment(1);
    if let Err(e) = store.mark_failed(id, message).await {
        error!("Failed to record failure for {}: {}", id, e);
    }
}
