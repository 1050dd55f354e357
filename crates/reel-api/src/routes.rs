//! API routes.

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_video, delete_video, download_video, get_video_status, health, list_music_tags,
    list_videos, list_voices,
};
use crate::metrics::metrics_middleware;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let api_routes = Router::new()
        .route("/short-video", post(create_video))
        .route("/short-video/:video_id/status", get(get_video_status))
        .route("/short-video/:video_id", get(download_video))
        .route("/short-video/:video_id", delete(delete_video))
        .route("/short-videos", get(list_videos))
        .route("/voices", get(list_voices))
        .route("/music-tags", get(list_music_tags));

    let health_routes = Router::new().route("/health", get(health));

    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use reel_store::{JobStore, StoreConfig};

    fn app(dir: &tempfile::TempDir) -> (Router, Arc<JobStore>) {
        let store = Arc::new(
            JobStore::new(StoreConfig {
                data_dir: dir.path().to_path_buf(),
            })
            .unwrap(),
        );
        let state = AppState::new(crate::ApiConfig::default(), Arc::clone(&store));
        (create_router(state, None), store)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn create_body() -> Value {
        json!({
            "title": "Morning routine",
            "scenes": [
                { "text": "Start the day with a walk.", "searchTerms": ["sunrise walk"] }
            ]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(&dir);

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_video_returns_id_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let (app, store) = app(&dir);

        let response = app
            .oneshot(post_json("/api/short-video", create_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        let id = body["videoId"].as_str().unwrap().to_string();

        // The record exists and is queued; no pipeline ran.
        let video = store
            .get(&reel_models::VideoId::from_string(id))
            .await
            .unwrap();
        assert_eq!(video.status, reel_models::VideoStatus::Queued);
    }

    #[tokio::test]
    async fn test_create_video_rejects_empty_scenes() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(&dir);

        let body = json!({ "title": "No scenes", "scenes": [] });
        let response = app.oneshot(post_json("/api/short-video", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_status_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(&dir);

        let created = app
            .clone()
            .oneshot(post_json("/api/short-video", create_body()))
            .await
            .unwrap();
        let id = body_json(created).await["videoId"].as_str().unwrap().to_string();

        let status = app
            .clone()
            .oneshot(
                Request::get(format!("/api/short-video/{}/status", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(status.status(), StatusCode::OK);
        let body = body_json(status).await;
        assert_eq!(body["status"], "queued");
        assert_eq!(body["title"], "Morning routine");

        let list = app
            .oneshot(Request::get("/api/short-videos").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(list).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_status_unknown_id_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(&dir);

        let response = app
            .oneshot(
                Request::get("/api/short-video/missing/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_download_requires_ready() {
        let dir = tempfile::tempdir().unwrap();
        let (app, store) = app(&dir);

        let created = app
            .clone()
            .oneshot(post_json("/api/short-video", create_body()))
            .await
            .unwrap();
        let id = body_json(created).await["videoId"].as_str().unwrap().to_string();
        let video_id = reel_models::VideoId::from_string(id.clone());

        // Queued: not downloadable.
        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/api/short-video/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Ready: bytes come back as video/mp4.
        store.mark_processing(&video_id).await.unwrap();
        let output = store.output_path(&video_id);
        tokio::fs::write(&output, b"mp4 bytes").await.unwrap();
        store.mark_ready(&video_id, output).await.unwrap();

        let response = app
            .oneshot(
                Request::get(format!("/api/short-video/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "video/mp4"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"mp4 bytes");
    }

    #[tokio::test]
    async fn test_delete_semantics() {
        let dir = tempfile::tempdir().unwrap();
        let (app, store) = app(&dir);

        let created = app
            .clone()
            .oneshot(post_json("/api/short-video", create_body()))
            .await
            .unwrap();
        let id = body_json(created).await["videoId"].as_str().unwrap().to_string();
        let video_id = reel_models::VideoId::from_string(id.clone());

        // Processing: delete conflicts.
        store.mark_processing(&video_id).await.unwrap();
        let response = app
            .clone()
            .oneshot(
                Request::delete(format!("/api/short-video/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        // Terminal: delete succeeds, then repeats as 404.
        store.mark_failed(&video_id, "no footage").await.unwrap();
        let response = app
            .clone()
            .oneshot(
                Request::delete(format!("/api/short-video/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::delete(format!("/api/short-video/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_catalogs() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(&dir);

        let voices = app
            .clone()
            .oneshot(Request::get("/api/voices").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let voices = body_json(voices).await;
        assert!(!voices.as_array().unwrap().is_empty());

        let tags = app
            .oneshot(Request::get("/api/music-tags").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let tags = body_json(tags).await;
        assert!(tags
            .as_array()
            .unwrap()
            .iter()
            .any(|t| t == "chill"));
    }
}
