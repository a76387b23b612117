//! Prediction and health payloads

use serde::Serialize;

use fire_alert_core::AlertLabel;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub alert_intensity: AlertLabel,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: i64,
    pub model_id: String,
    pub model_trained_at: i64,
    pub environment: String,
}
