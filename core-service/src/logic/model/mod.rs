//! Model Module - Classifier and Label Mapper
//!
//! - `forest` - bagged decision trees fitted by the trainer
//! - `artifact` - persisted model with checksum and layout metadata
//! - `classifier` - read-only handle used on the request path
//! - `label` - class ↔ alert intensity table

pub mod artifact;
pub mod classifier;
pub mod error;
pub mod forest;
pub mod label;


// Re-export common types
pub use artifact::{load_artifact, save_artifact, ModelArtifact, ModelMetadata};
pub use classifier::Classifier;
pub use error::ModelError;
pub use forest::{ForestParams, RandomForest, Row};
pub use label::{AlertClass, AlertLabel, N_CLASSES};
