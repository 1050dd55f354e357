//! Video job handlers.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use validator::Validate;

use reel_models::{CreateVideoRequest, Video, VideoId, VideoStatus};

use crate::error::{ApiError, ApiResult};
use crate::metrics::record_job_enqueued;
use crate::state::AppState;

/// Response for a newly created job.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoResponse {
    pub video_id: VideoId,
}

/// Status response for frontend polling.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatusResponse {
    pub id: VideoId,
    pub status: VideoStatus,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Video> for VideoStatusResponse {
    fn from(video: Video) -> Self {
        Self {
            id: video.id,
            status: video.status,
            title: video.title,
            description: video.description,
            created_at: video.created_at,
            error: video.error,
        }
    }
}

/// One entry in the job listing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListEntry {
    pub id: VideoId,
    pub status: VideoStatus,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Create a new short-video job. Returns immediately with the job id;
/// the pipeline runs on the worker task.
pub async fn create_video(
    State(state): State<AppState>,
    Json(request): Json<CreateVideoRequest>,
) -> ApiResult<(StatusCode, Json<CreateVideoResponse>)> {
    request.validate()?;

    let video = state.store.create(request).await?;
    record_job_enqueued();
    info!("Created video {} ({})", video.id, video.title);

    Ok((
        StatusCode::CREATED,
        Json(CreateVideoResponse { video_id: video.id }),
    ))
}

/// Poll one job's lifecycle status.
pub async fn get_video_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<VideoStatusResponse>> {
    let video = state.store.get(&VideoId::from_string(id)).await?;
    Ok(Json(video.into()))
}

/// Download the rendered MP4. Available only once the job is `Ready`.
pub async fn download_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = VideoId::from_string(id);
    let video = state.store.get(&id).await?;

    let output = match (&video.status, &video.output_file) {
        (VideoStatus::Ready, Some(path)) => path.clone(),
        _ => {
            return Err(ApiError::not_found(format!(
                "video {} is not ready (status: {})",
                id, video.status
            )))
        }
    };

    let bytes = tokio::fs::read(&output)
        .await
        .map_err(|e| ApiError::internal(format!("reading {}: {}", output.display(), e)))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}.mp4\"", id),
        )
        .body(bytes.into())
        .map_err(|e| ApiError::internal(e.to_string()))
}

/// Delete a job and its rendered output.
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = VideoId::from_string(id);
    state.store.delete(&id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// List all jobs, newest first.
pub async fn list_videos(State(state): State<AppState>) -> Json<Vec<VideoListEntry>> {
    let entries = state
        .store
        .list()
        .await
        .into_iter()
        .map(|v| VideoListEntry {
            id: v.id,
            status: v.status,
            title: v.title,
            created_at: v.created_at,
        })
        .collect();
    Json(entries)
}
