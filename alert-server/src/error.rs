//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use fire_alert_core::PredictError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Missing or malformed sensor values
    #[error("{0}")]
    ValidationError(String),

    // Reading log unreadable/unwritable
    #[error("{0}")]
    StorageError(String),

    // Anything else caught at the request boundary
    #[error("{0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::StorageError(msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.as_str())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.as_str())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::Validation(e) => AppError::ValidationError(e.to_string()),
            PredictError::Storage(e) => AppError::StorageError(e.to_string()),
        }
    }
}

impl From<fire_alert_core::StorageError> for AppError {
    fn from(err: fire_alert_core::StorageError) -> Self {
        AppError::StorageError(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(err.to_string())
    }
}
