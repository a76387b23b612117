//! Prediction handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use fire_alert_core::SensorReading;

use crate::models::PredictResponse;
use crate::{AppResult, AppState};

/// Classify one sensor reading and record it
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<SensorReading>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(reading) = payload?;

    // classification + CSV append are blocking
    let service = state.service.clone();
    let prediction = tokio::task::spawn_blocking(move || service.predict(&reading)).await??;

    tracing::info!(
        "Reading classified as {} (flame={}, smoke={}, temperature={}, humidity={})",
        prediction.label,
        prediction.record.flame,
        prediction.record.smoke,
        prediction.record.temperature,
        prediction.record.humidity
    );

    Ok(Json(PredictResponse {
        alert_intensity: prediction.label,
    }))
}
