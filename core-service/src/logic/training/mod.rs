//! Training Module - offline model fitting
//!
//! Runs as the `train-model` binary; shares nothing with the server except
//! the artifact file it writes.

pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod split;


pub use config::TrainingConfig;
pub use error::{RowIssue, TrainingError};
pub use loader::{encode, load_dataset, TrainingExample};
pub use pipeline::{run, train, TrainingReport};
pub use split::train_test_split;
