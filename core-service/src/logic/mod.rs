//! Logic Module - decision logic & data contracts
//!
//! - `features/` - Feature Vector Builder
//! - `model/` - Classifier, random forest, Label Mapper, artifact
//! - `reading_log/` - append-only CSV log of classified readings
//! - `training/` - offline training pipeline
//! - `predict` - request-scoped prediction pipeline

pub mod features;
pub mod model;
pub mod predict;
pub mod reading_log;
pub mod training;

#[cfg(test)]
pub(crate) mod test_support;
