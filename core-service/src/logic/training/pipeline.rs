//! Training Pipeline
//!
//! load dataset → encode labels → split → fit → score → persist.
//! The artifact is written only after every earlier step succeeded.

use serde::Serialize;
use uuid::Uuid;

use super::config::TrainingConfig;
use super::error::TrainingError;
use super::loader::{class_counts, encode, load_dataset, TrainingExample};
use super::split::train_test_split;
use crate::logic::model::Row;
use crate::logic::model::{save_artifact, AlertLabel, ModelArtifact, ModelMetadata, RandomForest, N_CLASSES};

/// Summary of a training run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub model_id: Uuid,
    pub rows: usize,
    pub class_counts: Vec<(AlertLabel, usize)>,
    pub train_samples: usize,
    pub test_samples: usize,
    /// Held-out accuracy; reported, never enforced
    pub accuracy: f64,
}

/// Fit a forest on already-validated examples
pub fn train(
    examples: &[TrainingExample],
    config: &TrainingConfig,
) -> Result<(ModelArtifact, TrainingReport), TrainingError> {
    let (x, y) = encode(examples)?;
    let (train_idx, test_idx) = train_test_split(x.len(), config.test_ratio, config.seed)?;

    let (x_train, y_train) = select(&x, &y, &train_idx);
    let (x_test, y_test) = select(&x, &y, &test_idx);
    log::info!(
        "Split {} rows into {} train / {} test (seed {})",
        x.len(),
        x_train.len(),
        x_test.len(),
        config.seed
    );

    let forest = RandomForest::fit(&x_train, &y_train, N_CLASSES, config.forest_params())?;
    let accuracy = forest.score(&x_test, &y_test);

    let metadata = ModelMetadata::new(x_train.len(), x_test.len(), Some(accuracy));
    let artifact = ModelArtifact::new(forest, metadata)?;

    let report = TrainingReport {
        model_id: artifact.metadata.model_id,
        rows: examples.len(),
        class_counts: class_counts(examples),
        train_samples: x_train.len(),
        test_samples: x_test.len(),
        accuracy,
    };

    Ok((artifact, report))
}

/// Full offline run: read `config.dataset_path`, write `config.model_path`
pub fn run(config: &TrainingConfig) -> Result<TrainingReport, TrainingError> {
    log::info!("Training from dataset: {}", config.dataset_path.display());

    let examples = load_dataset(&config.dataset_path)?;
    let (artifact, report) = train(&examples, config)?;

    save_artifact(&artifact, &config.model_path)?;
    log::info!(
        "Model {} saved to {} ({} trees)",
        report.model_id,
        config.model_path.display(),
        artifact.forest.n_trees()
    );

    Ok(report)
}

fn select(x: &[Row], y: &[usize], indices: &[usize]) -> (Vec<Row>, Vec<usize>) {
    indices.iter().map(|&i| (x[i], y[i])).unzip()
}
