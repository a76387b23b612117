use std::path::PathBuf;

use crate::constants;
use crate::logic::model::ForestParams;

/// Offline training configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Labeled CSV dataset
    pub dataset_path: PathBuf,

    /// Where the artifact is written (the server's MODEL_PATH)
    pub model_path: PathBuf,

    /// Number of trees
    pub n_estimators: usize,

    /// Held-out share for the accuracy report
    pub test_ratio: f64,

    /// Seed for both the split and the forest
    pub seed: u64,

    pub max_depth: Option<usize>,

    pub min_samples_split: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(constants::DEFAULT_DATASET_PATH),
            model_path: PathBuf::from(constants::DEFAULT_MODEL_PATH),
            n_estimators: constants::DEFAULT_N_ESTIMATORS,
            test_ratio: constants::DEFAULT_TEST_RATIO,
            seed: constants::DEFAULT_SEED,
            max_depth: None,
            min_samples_split: constants::DEFAULT_MIN_SAMPLES_SPLIT,
        }
    }
}

impl TrainingConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            dataset_path: PathBuf::from(constants::get_dataset_path()),
            model_path: PathBuf::from(constants::get_model_path()),
            n_estimators: constants::get_n_estimators(),
            test_ratio: constants::get_test_ratio(),
            seed: constants::get_seed(),
            ..Default::default()
        }
    }

    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_estimators: self.n_estimators,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            bootstrap: true,
            seed: self.seed,
        }
    }
}
