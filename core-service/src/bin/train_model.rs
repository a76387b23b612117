//! Fire Alert - offline model trainer
//!
//! Usage: `train-model [DATASET_PATH]`
//!
//! Reads the labeled dataset, fits the random forest and writes the artifact
//! the server loads at startup (`MODEL_PATH`, default `fire_model.json`).

use std::path::PathBuf;
use std::process::ExitCode;

use fire_alert_core::logic::training::{self, TrainingConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = TrainingConfig::from_env();
    if let Some(dataset) = std::env::args().nth(1) {
        config.dataset_path = PathBuf::from(dataset);
    }

    log::info!(
        "Training {} trees (seed {}, test ratio {})",
        config.n_estimators,
        config.seed,
        config.test_ratio
    );

    match training::run(&config) {
        Ok(report) => {
            for (label, count) in &report.class_counts {
                log::info!("   {}: {} rows", label, count);
            }
            println!("Model trained successfully!");
            println!("Accuracy: {}", report.accuracy);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Training failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
