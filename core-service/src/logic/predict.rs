//! Prediction Service - request-scoped pipeline
//!
//! validate → featurize → classify → map label → append to log.
//! A reading that fails validation never reaches the log. A log write
//! failure fails the whole prediction.

use serde::Serialize;

use crate::logic::features::{FeatureError, FeatureVector, SensorReading};
use crate::logic::model::{AlertClass, AlertLabel, Classifier};
use crate::logic::reading_log::{LogRecord, ReadingLog, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Validation(#[from] FeatureError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Outcome of one successful prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub class: AlertClass,
    pub label: AlertLabel,
    pub record: LogRecord,
}

/// Owns the loaded classifier and the reading log for the process lifetime
pub struct PredictionService {
    classifier: Classifier,
    log: ReadingLog,
}

impl PredictionService {
    pub fn new(classifier: Classifier, log: ReadingLog) -> Self {
        Self { classifier, log }
    }

    pub fn predict(&self, reading: &SensorReading) -> Result<Prediction, PredictError> {
        let vector = FeatureVector::from_reading(reading)?;

        let class = self.classifier.classify(&vector);
        let label = AlertLabel::from_class(class);
        let record = LogRecord::new(&vector, label);

        if let Err(e) = self.log.append(&record) {
            log::error!(
                "Failed to record reading {:?} (classified {}): {}",
                vector.as_array(),
                label,
                e
            );
            return Err(e.into());
        }

        log::debug!("Classified {:?} as {}", vector.as_array(), label);
        Ok(Prediction { class, label, record })
    }

    /// Full log contents for visualization
    pub fn history(&self) -> Result<Vec<LogRecord>, StorageError> {
        self.log.read_all()
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn reading_log(&self) -> &ReadingLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::tempdir;

    use super::*;
    use crate::logic::test_support::{label_for, log_path, small_classifier, small_config, synthetic_examples};
    use crate::logic::training::train;

    fn service(dir: &std::path::Path) -> PredictionService {
        let log = ReadingLog::open(log_path(dir)).unwrap();
        PredictionService::new(small_classifier(), log)
    }

    #[test]
    fn test_valid_reading_is_labeled_and_logged_verbatim() {
        let dir = tempdir().unwrap();
        let service = service(dir.path());

        let reading: SensorReading = serde_json::from_value(json!({
            "flame": 1, "smoke": 0, "temperature": 45, "humidity": 20
        }))
        .unwrap();
        let prediction = service.predict(&reading).unwrap();

        assert_ne!(prediction.label, AlertLabel::Unknown);
        assert_eq!(prediction.label, AlertLabel::from_class(prediction.class));

        let history = service.history().unwrap();
        assert_eq!(history.len(), 1);
        let row = &history[0];
        assert_eq!(
            [row.flame, row.smoke, row.temperature, row.humidity],
            [1.0, 0.0, 45.0, 20.0]
        );
        assert_eq!(row.alert_intensity, prediction.label);
        assert_eq!(row, &prediction.record);
    }

    #[test]
    fn test_each_prediction_appends_exactly_one_row() {
        let dir = tempdir().unwrap();
        let service = service(dir.path());

        for (i, temperature) in [22.0, 37.5, 61.0].iter().enumerate() {
            service.predict(&SensorReading::new(0.0, 1.0, *temperature, 30.0)).unwrap();
            assert_eq!(service.reading_log().len().unwrap(), i + 1);
        }
    }

    #[test]
    fn test_classifier_learned_the_grid_rule() {
        let dir = tempdir().unwrap();
        let service = service(dir.path());

        let prediction = service.predict(&SensorReading::new(1.0, 1.0, 65.0, 10.0)).unwrap();
        assert_eq!(prediction.label, label_for(1.0, 1.0, 65.0));

        let prediction = service.predict(&SensorReading::new(0.0, 0.0, 20.0, 70.0)).unwrap();
        assert_eq!(prediction.label, label_for(0.0, 0.0, 20.0));
    }

    #[test]
    fn test_missing_fields_leave_log_unchanged() {
        let dir = tempdir().unwrap();
        let service = service(dir.path());
        service.predict(&SensorReading::new(0.0, 0.0, 25.0, 50.0)).unwrap();
        let before = fs::read_to_string(log_path(dir.path())).unwrap();

        let partial: SensorReading = serde_json::from_value(json!({ "flame": 1, "smoke": 1 })).unwrap();
        let err = service.predict(&partial).unwrap_err();

        assert!(matches!(err, PredictError::Validation(FeatureError::MissingFields(_))));
        assert_eq!(fs::read_to_string(log_path(dir.path())).unwrap(), before);
        assert_eq!(service.history().unwrap().len(), 1);
    }

    #[test]
    fn test_fresh_log_history_is_empty() {
        let dir = tempdir().unwrap();
        assert!(service(dir.path()).history().unwrap().is_empty());
    }

    #[test]
    fn test_storage_failure_fails_prediction() {
        let dir = tempdir().unwrap();
        // a directory where the log file should be
        let blocked = dir.path().join("fire_logs.csv");
        fs::create_dir_all(&blocked).unwrap();
        let service = PredictionService::new(small_classifier(), ReadingLog::new(&blocked));

        let err = service.predict(&SensorReading::new(1.0, 0.0, 45.0, 20.0)).unwrap_err();
        assert!(matches!(err, PredictError::Storage(_)));
    }

    #[test]
    fn test_pinned_model_gives_reproducible_label() {
        let dir = tempdir().unwrap();
        let config = small_config(dir.path());
        let reading = SensorReading::new(1.0, 0.0, 45.0, 20.0);

        let labels: Vec<AlertLabel> = (0..2)
            .map(|i| {
                let (artifact, _) = train(&synthetic_examples(), &config).unwrap();
                let log = ReadingLog::open(dir.path().join(format!("run{}.csv", i))).unwrap();
                let service = PredictionService::new(Classifier::from_artifact(artifact), log);
                service.predict(&reading).unwrap().label
            })
            .collect();

        assert_eq!(labels[0], labels[1]);
        assert_ne!(labels[0], AlertLabel::Unknown);
    }
}
