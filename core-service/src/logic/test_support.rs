//! Shared fixtures: a rule-labeled synthetic dataset and a small forest.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::logic::model::{AlertLabel, Classifier, ForestParams, RandomForest, N_CLASSES};
use crate::logic::training::{encode, TrainingConfig, TrainingExample};

/// Ground truth used to label the synthetic dataset
pub fn label_for(flame: f64, smoke: f64, temperature: f64) -> AlertLabel {
    if flame >= 1.0 && temperature >= 45.0 {
        AlertLabel::High
    } else if flame >= 1.0 || (smoke >= 1.0 && temperature >= 35.0) {
        AlertLabel::Medium
    } else {
        AlertLabel::Low
    }
}

/// 220 grid readings labeled by [`label_for`]
pub fn synthetic_examples() -> Vec<TrainingExample> {
    let mut examples = Vec::new();
    for flame in [0.0, 1.0] {
        for smoke in [0.0, 1.0] {
            for step in 0..11 {
                let temperature = 20.0 + step as f64 * 5.0;
                for humidity in [10.0, 25.0, 40.0, 55.0, 70.0] {
                    examples.push(TrainingExample {
                        values: [flame, smoke, temperature, humidity],
                        label: label_for(flame, smoke, temperature),
                    });
                }
            }
        }
    }
    examples
}

/// Write examples as a dataset CSV (label column last, like the field export)
pub fn write_dataset(path: &Path, examples: &[TrainingExample]) {
    let mut csv = String::from("flame,smoke,temperature,humidity,alert_intensity\n");
    for example in examples {
        let [flame, smoke, temperature, humidity] = example.values;
        writeln!(csv, "{},{},{},{},{}", flame, smoke, temperature, humidity, example.label).unwrap();
    }
    fs::write(path, csv).unwrap();
}

/// Small, fast config rooted in `dir`
pub fn small_config(dir: &Path) -> TrainingConfig {
    TrainingConfig {
        dataset_path: dir.join("fire_sensor_dataset.csv"),
        model_path: dir.join("fire_model.json"),
        n_estimators: 20,
        ..Default::default()
    }
}

/// Forest fitted on the full synthetic dataset
pub fn small_classifier() -> Classifier {
    let (x, y) = encode(&synthetic_examples()).unwrap();
    let params = ForestParams { n_estimators: 20, ..Default::default() };
    let forest = RandomForest::fit(&x, &y, N_CLASSES, params).unwrap();
    Classifier::from_forest(forest).unwrap()
}

pub fn log_path(dir: &Path) -> PathBuf {
    dir.join("fire_logs.csv")
}
