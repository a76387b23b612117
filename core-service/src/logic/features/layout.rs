//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema shared by training and serving.**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! A model artifact records the version and hash it was trained with; the
//! classifier refuses artifacts whose layout differs.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    "flame",        // 0: flame sensor reading
    "smoke",        // 1: smoke sensor reading
    "temperature",  // 2: ambient temperature
    "humidity",     // 3: relative humidity
];

/// Total number of features
/// Must match FEATURE_LAYOUT.len()
pub const FEATURE_COUNT: usize = 4;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout information embedded in model artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), got v{actual_version} (hash: {actual_hash:08x})")]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that incoming layout metadata matches the current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================
