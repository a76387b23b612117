use std::path::PathBuf;

use crate::logic::features::layout::LayoutMismatchError;

/// Failure to fit, persist or load a classifier
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Model I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported model artifact format v{0}")]
    UnsupportedFormat(u32),

    #[error("Model checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatchError),

    #[error("Model artifact contains no trees")]
    EmptyForest,

    #[error("Malformed tree {tree} in model artifact: {reason}")]
    MalformedTree { tree: usize, reason: String },

    #[error("Invalid training data: {0}")]
    InvalidTrainingData(String),
}
