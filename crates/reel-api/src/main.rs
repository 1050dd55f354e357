//! Axum API server binary.
//!
//! Runs the REST API and the in-process worker loop that drives queued
//! jobs through the video pipeline.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reel_api::{create_router, metrics, ApiConfig, AppState};
use reel_music::{MusicLibrary, MusicLibraryConfig};
use reel_narration::{AlignmentClient, NarrationResolver, SpeechClient, SpeechServiceConfig};
use reel_stock::{PexelsBackend, PexelsConfig, StockSelector};
use reel_store::JobStore;
use reel_worker::{Executor, HttpRenderer, Pipeline, RendererConfig, WorkerConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("reel=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting reel-api");

    let config = ApiConfig::from_env();
    info!("API config: host={}, port={}", config.host, config.port);

    let store = match JobStore::from_env() {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to create job store: {}", e);
            std::process::exit(1);
        }
    };

    let pipeline = match build_pipeline() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to build pipeline: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize metrics
    let metrics_enabled = std::env::var("METRICS_ENABLED")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(true);

    let metrics_handle = if metrics_enabled {
        info!("Prometheus metrics enabled at /metrics");
        Some(metrics::init_metrics())
    } else {
        None
    };

    // Start the worker loop
    let executor = Arc::new(Executor::new(
        Arc::clone(&store),
        pipeline,
        WorkerConfig::from_env(),
    ));
    let worker_shutdown = executor.shutdown_handle();
    let worker_handle = {
        let executor = Arc::clone(&executor);
        tokio::spawn(async move { executor.run().await })
    };

    let state = AppState::new(config.clone(), store);
    let app = create_router(state, metrics_handle);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid bind address");

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // Stop the worker loop and let the active job record its state.
    let _ = worker_shutdown.send(true);
    let _ = worker_handle.await;

    info!("Server shutdown complete");
}

/// Wire the pipeline from environment configuration.
fn build_pipeline() -> anyhow::Result<Pipeline> {
    let speech_config = SpeechServiceConfig::from_env("SPEECH_SERVICE_URL", "http://localhost:8801");
    let alignment_config =
        SpeechServiceConfig::from_env("ALIGNMENT_SERVICE_URL", "http://localhost:8802");
    let narration = NarrationResolver::new(
        Arc::new(SpeechClient::new(speech_config)?),
        Arc::new(AlignmentClient::new(alignment_config)?),
    );

    let pexels_config = PexelsConfig::from_env()?;
    let stock = StockSelector::new(Arc::new(PexelsBackend::new(pexels_config)?));

    let music = Arc::new(MusicLibrary::load(&MusicLibraryConfig::from_env())?);
    let renderer = Arc::new(HttpRenderer::new(RendererConfig::from_env())?);

    let worker_config = WorkerConfig::from_env();
    Ok(Pipeline::new(
        narration,
        stock,
        music,
        renderer,
        worker_config.query_timeout,
    ))
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Received shutdown signal");
}
