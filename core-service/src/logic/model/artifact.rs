//! Model artifact - persisted forest plus metadata
//!
//! JSON document written by the trainer and read once at server startup.
//! The SHA-256 of the serialized forest is stored next to it and verified
//! on load, together with the feature layout the forest was trained on.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::error::ModelError;
use super::forest::RandomForest;
use super::label::{AlertLabel, N_CLASSES};
use crate::logic::features::layout::{validate_layout, LayoutInfo};

/// Current artifact format version
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Provenance of a trained forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub layout: LayoutInfo,
    pub classes: Vec<AlertLabel>,
    pub train_samples: usize,
    pub test_samples: usize,
    /// Held-out accuracy (diagnostic only)
    pub test_accuracy: Option<f64>,
}

impl ModelMetadata {
    pub fn new(train_samples: usize, test_samples: usize, test_accuracy: Option<f64>) -> Self {
        Self {
            model_id: Uuid::new_v4(),
            trained_at: Utc::now(),
            layout: LayoutInfo::current(),
            classes: AlertLabel::known().to_vec(),
            train_samples,
            test_samples,
            test_accuracy,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub metadata: ModelMetadata,
    /// Hex SHA-256 of the serialized forest
    pub checksum: String,
    pub forest: RandomForest,
}

impl ModelArtifact {
    pub fn new(forest: RandomForest, metadata: ModelMetadata) -> Result<Self, ModelError> {
        let checksum = forest_checksum(&forest)?;
        Ok(Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            metadata,
            checksum,
            forest,
        })
    }

    /// Check format, layout, checksum and tree structure
    pub fn verify(&self) -> Result<(), ModelError> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ModelError::UnsupportedFormat(self.format_version));
        }

        validate_layout(self.metadata.layout.version, self.metadata.layout.hash)?;

        let actual = forest_checksum(&self.forest)?;
        if actual != self.checksum {
            return Err(ModelError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }

        if self.forest.n_classes() != N_CLASSES {
            return Err(ModelError::MalformedTree {
                tree: 0,
                reason: format!("{} classes, expected {}", self.forest.n_classes(), N_CLASSES),
            });
        }
        self.forest.validate()?;

        Ok(())
    }
}

/// Hex SHA-256 over the forest's JSON encoding
pub fn forest_checksum(forest: &RandomForest) -> Result<String, ModelError> {
    let bytes = serde_json::to_vec(forest)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Save artifact to disk.
///
/// Writes a sibling temp file first and renames it over `path`, so readers
/// never observe a half-written artifact.
pub fn save_artifact(artifact: &ModelArtifact, path: &Path) -> Result<(), ModelError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_vec_pretty(artifact)?;
    let tmp = temp_path(path);
    fs::write(&tmp, json)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Load artifact from disk with validation
pub fn load_artifact(path: &Path) -> Result<ModelArtifact, ModelError> {
    if !path.exists() {
        return Err(ModelError::NotFound(path.to_path_buf()));
    }

    let data = fs::read(path)?;
    let artifact: ModelArtifact = serde_json::from_slice(&data)?;
    artifact.verify()?;

    Ok(artifact)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
