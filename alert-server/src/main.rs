//! Fire Alert Server
//!
//! HTTP front end for the fire-sensor classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  FIRE ALERT SERVER                   │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────────────────────┐    │
//! │  │  API      │──►│  PredictionService           │    │
//! │  │  (Axum)   │   │  classifier + reading log    │    │
//! │  └───────────┘   └──────────────┬───────────────┘    │
//! │                                 ▼                    │
//! │                  fire_model.json   fire_logs.csv     │
//! └──────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fire_alert_core::{Classifier, PredictionService, ReadingLog};

pub use error::AppResult;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging (also captures `log` records from the core crate)
    let json_logs = config.is_production();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fire_alert_server=debug,fire_alert_core=info,tower_http=debug".into()
            }),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Fire Alert Server starting...");
    tracing::info!("Model: {}", config.model_path.display());
    tracing::info!("Reading log: {}", config.log_path.display());

    // Without a model the service cannot answer anything
    let service = build_service(&config)?;

    // Build application state
    let state = AppState {
        service: Arc::new(service),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Model first: a startup without a model must not touch the log
fn build_service(config: &config::Config) -> anyhow::Result<PredictionService> {
    let classifier = Classifier::load(&config.model_path).with_context(|| {
        format!("failed to load model {}", config.model_path.display())
    })?;

    let log = ReadingLog::open(config.log_path.clone()).with_context(|| {
        format!("failed to initialize reading log {}", config.log_path.display())
    })?;

    let metadata = classifier.metadata();
    tracing::info!(
        "Model {} loaded (trained {}, {} trees)",
        metadata.model_id,
        metadata.trained_at,
        classifier.forest().n_trees()
    );

    Ok(PredictionService::new(classifier, log))
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub config: config::Config,
}

fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/predict", post(handlers::predict::predict))
        .route("/data", get(handlers::data::list))
        .route("/health", get(handlers::health::check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
