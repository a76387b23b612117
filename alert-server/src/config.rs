//! Configuration module

use std::env;
use std::path::PathBuf;

use fire_alert_core::constants;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Trained model artifact, loaded once at startup
    pub model_path: PathBuf,

    /// Reading log CSV
    pub log_path: PathBuf,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            model_path: PathBuf::from(constants::get_model_path()),

            log_path: PathBuf::from(constants::get_log_path()),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
