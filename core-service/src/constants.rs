//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Both the server and the offline trainer read their fallbacks from here.

/// Default model artifact path (written by the trainer, loaded by the server)
pub const DEFAULT_MODEL_PATH: &str = "fire_model.json";

/// Default reading log path
pub const DEFAULT_LOG_PATH: &str = "fire_logs.csv";

/// Default labeled training dataset
pub const DEFAULT_DATASET_PATH: &str = "./fire_sensor_dataset_1000.csv";

/// Number of trees in the forest
pub const DEFAULT_N_ESTIMATORS: usize = 100;

/// Held-out share of the dataset used for the accuracy report
pub const DEFAULT_TEST_RATIO: f64 = 0.2;

/// Seed shared by the split and the forest
pub const DEFAULT_SEED: u64 = 42;

/// Smallest node the tree builder will still try to split
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;

/// Timestamp format of the reading log
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model artifact path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get reading log path from environment or use default
pub fn get_log_path() -> String {
    std::env::var("LOG_PATH")
        .unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string())
}

/// Get training dataset path from environment or use default
pub fn get_dataset_path() -> String {
    std::env::var("DATASET_PATH")
        .unwrap_or_else(|_| DEFAULT_DATASET_PATH.to_string())
}

/// Get tree count from environment or use default
pub fn get_n_estimators() -> usize {
    std::env::var("N_ESTIMATORS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_N_ESTIMATORS)
}

/// Get held-out ratio from environment or use default
pub fn get_test_ratio() -> f64 {
    std::env::var("TEST_RATIO")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|r: &f64| *r > 0.0 && *r < 1.0)
        .unwrap_or(DEFAULT_TEST_RATIO)
}

/// Get seed from environment or use default
pub fn get_seed() -> u64 {
    std::env::var("SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED)
}
