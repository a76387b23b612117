use std::path::Path;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

use fire_alert_core::logic::model::{ForestParams, RandomForest, N_CLASSES};
use fire_alert_core::{Classifier, PredictionService, ReadingLog};

use crate::config::Config;
use crate::{build_service, create_router, AppState};

fn fitted_classifier() -> Classifier {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for flame in [0.0, 1.0] {
        for smoke in [0.0, 1.0] {
            for temperature in (20..=60).step_by(5) {
                let temperature = temperature as f64;
                let class = if flame == 1.0 && temperature >= 45.0 {
                    0
                } else if flame == 1.0 || (smoke == 1.0 && temperature >= 35.0) {
                    2
                } else {
                    1
                };
                x.push([flame, smoke, temperature, 30.0]);
                y.push(class);
            }
        }
    }

    let params = ForestParams {
        n_estimators: 10,
        ..Default::default()
    };
    let forest = RandomForest::fit(&x, &y, N_CLASSES, params).unwrap();
    Classifier::from_forest(forest).unwrap()
}

fn test_app() -> (Router, TempDir) {
    let dir = tempdir().unwrap();
    let log = ReadingLog::open(dir.path().join("fire_logs.csv")).unwrap();
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        model_path: dir.path().join("fire_model.json"),
        log_path: dir.path().join("fire_logs.csv"),
        environment: "test".to_string(),
    };

    let state = AppState {
        service: Arc::new(PredictionService::new(fitted_classifier(), log)),
        config,
    };
    (create_router(state), dir)
}

fn logged_rows(dir: &Path) -> usize {
    ReadingLog::new(dir.join("fire_logs.csv")).len().unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_json(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_predict_returns_label_and_logs_reading() {
    let (app, dir) = test_app();

    let body = json!({"flame": 1, "smoke": 0, "temperature": 45, "humidity": 20}).to_string();
    let (status, value) = send(app.clone(), post_json(body)).await;

    assert_eq!(status, StatusCode::OK);
    let label = value["alert_intensity"].as_str().unwrap();
    assert!(["Low", "Medium", "High", "Unknown"].contains(&label));
    assert_eq!(logged_rows(dir.path()), 1);

    let request = Request::builder().uri("/data").body(Body::empty()).unwrap();
    let (status, value) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["alert_intensity"], label);
    assert_eq!(rows[0]["temperature"], 45.0);
}

#[tokio::test]
async fn test_predict_missing_field_is_rejected_without_logging() {
    let (app, dir) = test_app();

    let body = json!({"flame": 1, "smoke": 0, "temperature": 45}).to_string();
    let (status, value) = send(app, post_json(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["status"], 400);
    let error = value["error"].as_str().unwrap();
    assert!(error.contains("Missing one or more sensor values"));
    assert!(error.contains("humidity"));
    assert_eq!(logged_rows(dir.path()), 0);
}

#[tokio::test]
async fn test_predict_malformed_json_is_bad_request() {
    let (app, dir) = test_app();

    let (status, value) = send(app, post_json("{not json".to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["error"].is_string());
    assert_eq!(logged_rows(dir.path()), 0);
}

#[tokio::test]
async fn test_data_on_fresh_log_is_empty_array() {
    let (app, _dir) = test_app();

    let request = Request::builder().uri("/data").body(Body::empty()).unwrap();
    let (status, value) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!([]));
}

#[tokio::test]
async fn test_health_reports_loaded_model() {
    let (app, _dir) = test_app();

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, value) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["status"], "healthy");
    assert_eq!(value["environment"], "test");
    assert!(value["model_id"].is_string());
}

#[test]
fn test_missing_model_aborts_before_log_is_created() {
    let dir = tempdir().unwrap();
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        model_path: dir.path().join("absent_model.json"),
        log_path: dir.path().join("fire_logs.csv"),
        environment: "test".to_string(),
    };

    let err = build_service(&config).err().unwrap();
    assert!(err.to_string().contains("failed to load model"));
    assert!(!config.log_path.exists());
}
