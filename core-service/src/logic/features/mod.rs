//! Features Module - Feature Vector Builder
//!
//! Validates raw sensor input and turns it into the fixed-order vector
//! consumed by the classifier.

pub mod layout;
pub mod vector;


// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::{FeatureError, FeatureVector, SensorReading};
