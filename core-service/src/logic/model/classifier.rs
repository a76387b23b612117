//! Classifier - immutable wrapper around a loaded forest
//!
//! Loaded once at startup; shared read-only between request handlers.

use std::path::Path;

use super::artifact::{load_artifact, ModelArtifact, ModelMetadata};
use super::error::ModelError;
use super::forest::RandomForest;
use super::label::AlertClass;
use crate::logic::features::FeatureVector;

#[derive(Debug, Clone)]
pub struct Classifier {
    forest: RandomForest,
    metadata: ModelMetadata,
    checksum: String,
}

impl Classifier {
    /// Load and verify the artifact at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        log::info!("Loading model artifact from: {}", path.display());

        let artifact = load_artifact(path)?;
        let classifier = Self::from_artifact(artifact);

        log::info!(
            "Model {} loaded: {} trees, trained at {}, checksum {}",
            classifier.metadata.model_id,
            classifier.forest.n_trees(),
            classifier.metadata.trained_at,
            &classifier.checksum[..classifier.checksum.len().min(12)],
        );
        Ok(classifier)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self {
            forest: artifact.forest,
            metadata: artifact.metadata,
            checksum: artifact.checksum,
        }
    }

    /// Wrap a freshly fitted forest (no held-out statistics)
    pub fn from_forest(forest: RandomForest) -> Result<Self, ModelError> {
        let artifact = ModelArtifact::new(forest, ModelMetadata::new(0, 0, None))?;
        Ok(Self::from_artifact(artifact))
    }

    /// Classify a vector built against the current feature layout
    pub fn classify(&self, vector: &FeatureVector) -> AlertClass {
        debug_assert!(vector.validate().is_ok(), "feature vector built with a stale layout");
        AlertClass::from(self.forest.predict(vector.as_array()))
    }

    /// Per-class probabilities in class order
    pub fn class_probabilities(&self, vector: &FeatureVector) -> Vec<f64> {
        self.forest.predict_proba(vector.as_array())
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }
}
