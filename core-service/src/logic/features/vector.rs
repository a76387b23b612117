//! Feature Vector - Core data structure for model input
//!
//! Converts a raw [`SensorReading`] into the fixed-order numeric vector the
//! forest was trained on. The order comes from `layout.rs`, never from the
//! order keys arrive in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::layout::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};

// ============================================================================
// RAW INPUT
// ============================================================================

/// Raw sensor payload as received from a device.
///
/// Every field is optional at this stage; absent keys and explicit `null`
/// both deserialize to `None` and are rejected by [`FeatureVector::from_reading`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(default)]
    pub flame: Option<Value>,
    #[serde(default)]
    pub smoke: Option<Value>,
    #[serde(default)]
    pub temperature: Option<Value>,
    #[serde(default)]
    pub humidity: Option<Value>,
}

impl SensorReading {
    /// Build a complete numeric reading
    pub fn new(flame: f64, smoke: f64, temperature: f64, humidity: f64) -> Self {
        Self {
            flame: Some(Value::from(flame)),
            smoke: Some(Value::from(smoke)),
            temperature: Some(Value::from(temperature)),
            humidity: Some(Value::from(humidity)),
        }
    }

    /// Fields in layout order
    fn fields(&self) -> [(&'static str, Option<&Value>); FEATURE_COUNT] {
        [
            (FEATURE_LAYOUT[0], self.flame.as_ref()),
            (FEATURE_LAYOUT[1], self.smoke.as_ref()),
            (FEATURE_LAYOUT[2], self.temperature.as_ref()),
            (FEATURE_LAYOUT[3], self.humidity.as_ref()),
        ]
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Validation failure while building a feature vector
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    #[error("Missing one or more sensor values: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Sensor value '{field}' is not numeric: {value}")]
    InvalidField { field: &'static str, value: String },
}

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned feature vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from raw values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Validate and normalize a raw reading.
    ///
    /// All missing fields are reported together, in layout order.
    pub fn from_reading(reading: &SensorReading) -> Result<Self, FeatureError> {
        let fields = reading.fields();

        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.map_or(true, Value::is_null))
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(FeatureError::MissingFields(missing));
        }

        let mut values = [0.0f64; FEATURE_COUNT];
        for (slot, (name, value)) in values.iter_mut().zip(fields.iter()) {
            // checked above
            if let Some(value) = value {
                *slot = to_number(*name, value)?;
            }
        }

        Ok(Self::from_values(values))
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        super::layout::feature_index(name).and_then(|i| self.values.get(i).copied())
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Get feature names for this vector
    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

/// Numeric coercion for one sensor value.
///
/// Numbers pass through, numeric strings are parsed, booleans become 0/1.
fn to_number(field: &'static str, value: &Value) -> Result<f64, FeatureError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| FeatureError::InvalidField {
            field,
            value: value.to_string(),
        })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_carries_layout() {
        let vector = FeatureVector::from_values([1.0, 0.0, 45.0, 20.0]);
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
        assert!(vector.validate().is_ok());
    }

    #[test]
    fn test_get_by_name() {
        let vector: FeatureVector = [1.0, 0.0, 45.0, 20.0].into();
        assert_eq!(vector.get_by_name("temperature"), Some(45.0));
        assert_eq!(vector.get_by_name("humidity"), Some(20.0));
        assert_eq!(vector.get_by_name("pressure"), None);
    }

    #[test]
    fn test_stale_layout_rejected() {
        let mut vector = FeatureVector::from_values([0.0; FEATURE_COUNT]);
        vector.layout_hash ^= 1;
        assert!(vector.validate().is_err());
    }
}
