//! Logged data for dashboard visualization

use axum::{extract::State, Json};

use fire_alert_core::LogRecord;

use crate::{AppResult, AppState};

/// Whole reading log, in file order
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<LogRecord>>> {
    let service = state.service.clone();
    let records = tokio::task::spawn_blocking(move || service.history()).await??;

    tracing::debug!("Serving {} logged readings", records.len());
    Ok(Json(records))
}
