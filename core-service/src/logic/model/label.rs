//! Label Mapper
//!
//! Fixed table between the classifier's ordinal classes and the
//! human-readable alert intensity. The trainer encodes with the same table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of ordinal classes the forest is trained on
pub const N_CLASSES: usize = 3;

/// Ordinal class emitted by the classifier (0 = Low, 1 = Medium, 2 = High)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlertClass(pub i64);

impl AlertClass {
    /// Index into per-class tables, if within the trained range
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok().filter(|i| *i < N_CLASSES)
    }
}

impl From<usize> for AlertClass {
    fn from(index: usize) -> Self {
        AlertClass(index as i64)
    }
}

/// Human-readable alert intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertLabel {
    Low,
    Medium,
    High,
    /// Fallback for a class outside the table
    Unknown,
}

const LABEL_TABLE: [(i64, AlertLabel); N_CLASSES] = [
    (0, AlertLabel::Low),
    (1, AlertLabel::Medium),
    (2, AlertLabel::High),
];

impl AlertLabel {
    /// Map a class to its label. Never fails: unmapped classes yield `Unknown`.
    pub fn from_class(class: AlertClass) -> Self {
        LABEL_TABLE
            .iter()
            .find(|(ordinal, _)| *ordinal == class.0)
            .map(|(_, label)| *label)
            .unwrap_or(AlertLabel::Unknown)
    }

    /// Ordinal encoding used for training; `None` for `Unknown`
    pub fn class(self) -> Option<AlertClass> {
        LABEL_TABLE
            .iter()
            .find(|(_, label)| *label == self)
            .map(|(ordinal, _)| AlertClass(*ordinal))
    }

    /// Parse a ground-truth label. Only the three trained labels are accepted.
    pub fn parse_known(s: &str) -> Option<Self> {
        let s = s.trim();
        LABEL_TABLE
            .iter()
            .map(|(_, label)| *label)
            .find(|label| label.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLabel::Low => "Low",
            AlertLabel::Medium => "Medium",
            AlertLabel::High => "High",
            AlertLabel::Unknown => "Unknown",
        }
    }

    /// Labels in class order
    pub fn known() -> [AlertLabel; N_CLASSES] {
        LABEL_TABLE.map(|(_, label)| label)
    }
}

impl From<AlertClass> for AlertLabel {
    fn from(class: AlertClass) -> Self {
        AlertLabel::from_class(class)
    }
}

impl fmt::Display for AlertLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_mapping() {
        assert_eq!(AlertLabel::from_class(AlertClass(0)), AlertLabel::Low);
        assert_eq!(AlertLabel::from_class(AlertClass(1)), AlertLabel::Medium);
        assert_eq!(AlertLabel::from_class(AlertClass(2)), AlertLabel::High);
    }

    #[test]
    fn test_unmapped_class_is_unknown() {
        for raw in [-1, 3, 7, i64::MAX, i64::MIN] {
            assert_eq!(AlertLabel::from(AlertClass(raw)), AlertLabel::Unknown);
        }
    }

    #[test]
    fn test_encoding_inverts_mapping() {
        for label in AlertLabel::known() {
            let class = label.class().unwrap();
            assert_eq!(AlertLabel::from_class(class), label);
        }
        assert_eq!(AlertLabel::Unknown.class(), None);
    }

    #[test]
    fn test_parse_known_labels_only() {
        assert_eq!(AlertLabel::parse_known("High"), Some(AlertLabel::High));
        assert_eq!(AlertLabel::parse_known(" Medium "), Some(AlertLabel::Medium));
        assert_eq!(AlertLabel::parse_known("Unknown"), None);
        assert_eq!(AlertLabel::parse_known("high"), None);
        assert_eq!(AlertLabel::parse_known(""), None);
    }

    #[test]
    fn test_serialized_as_plain_string() {
        assert_eq!(serde_json::to_string(&AlertLabel::Medium).unwrap(), "\"Medium\"");
        assert_eq!(AlertLabel::High.to_string(), "High");
    }

    #[test]
    fn test_class_index() {
        assert_eq!(AlertClass(2).index(), Some(2));
        assert_eq!(AlertClass(3).index(), None);
        assert_eq!(AlertClass(-1).index(), None);
    }
}
