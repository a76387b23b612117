//! Fire Alert Core
//!
//! Decision logic and data contracts for the fire-sensor alert service:
//!
//! ```text
//! raw reading ─► features ─► model (forest) ─► label ─► dataset (reading log)
//!                                 ▲
//!                 training ───────┘ (offline, writes the artifact)
//! ```
//!
//! The HTTP layer lives in `fire-alert-server`; the offline trainer is the
//! `train-model` binary of this crate.

pub mod constants;
pub mod logic;

pub use logic::reading_log::{LogRecord, ReadingLog, StorageError};
pub use logic::features::{FeatureError, FeatureVector, SensorReading};
pub use logic::model::{AlertClass, AlertLabel, Classifier, ModelError};
pub use logic::predict::{PredictError, Prediction, PredictionService};
pub use logic::training::{TrainingConfig, TrainingError, TrainingReport};
