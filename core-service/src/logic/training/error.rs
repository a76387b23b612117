use std::fmt;

use crate::logic::model::ModelError;

/// A dataset row that cannot become a training example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    /// 1-based line in the dataset file, or position for in-memory examples
    pub line: u64,
    pub reason: String,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("Dataset I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("{} dataset row(s) rejected ({})", .0.len(), summarize(.0))]
    InvalidRows(Vec<RowIssue>),

    #[error("Dataset too small: {rows} row(s) cannot be split with test ratio {test_ratio}")]
    TooSmall { rows: usize, test_ratio: f64 },

    #[error(transparent)]
    Model(#[from] ModelError),
}

fn summarize(issues: &[RowIssue]) -> String {
    const SHOWN: usize = 5;
    let mut text = issues
        .iter()
        .take(SHOWN)
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    if issues.len() > SHOWN {
        text.push_str(&format!("; and {} more", issues.len() - SHOWN));
    }
    text
}
