//! Health check handler

use axum::{extract::State, Json};

use crate::models::HealthResponse;
use crate::AppState;

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let metadata = state.service.classifier().metadata();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model_id: metadata.model_id.to_string(),
        model_trained_at: metadata.trained_at.timestamp(),
        environment: state.config.environment.clone(),
    })
}
