//! Labeled dataset loading and label encoding

use std::path::Path;

use csv::StringRecord;

use super::error::{RowIssue, TrainingError};
use crate::logic::features::{FEATURE_COUNT, FEATURE_LAYOUT};
use crate::logic::model::Row;
use crate::logic::model::AlertLabel;

/// Name of the ground-truth column
pub const LABEL_COLUMN: &str = "alert_intensity";

/// One historical reading with its ground-truth label
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub values: Row,
    pub label: AlertLabel,
}

/// Read the dataset and validate every row.
///
/// Rows with a label outside Low/Medium/High or with a missing or
/// non-numeric feature are all collected and reported together; nothing
/// is silently dropped.
pub fn load_dataset(path: &Path) -> Result<Vec<TrainingExample>, TrainingError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let columns = column_indices(&headers)?;

    let mut examples = Vec::new();
    let mut issues = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        match parse_example(&record, &columns) {
            Ok(example) => examples.push(example),
            Err(reason) => issues.push(RowIssue { line, reason }),
        }
    }

    if !issues.is_empty() {
        return Err(TrainingError::InvalidRows(issues));
    }

    log::info!("Loaded {} labeled rows from {}", examples.len(), path.display());
    Ok(examples)
}

/// Ordinal encoding (Low=0, Medium=1, High=2) as a training matrix.
///
/// Every example must carry a trained label; the ones that do not are all
/// reported, by 1-based position, instead of being dropped.
pub fn encode(examples: &[TrainingExample]) -> Result<(Vec<Row>, Vec<usize>), TrainingError> {
    let mut x = Vec::with_capacity(examples.len());
    let mut y = Vec::with_capacity(examples.len());
    let mut issues = Vec::new();

    for (position, example) in examples.iter().enumerate() {
        match example.label.class().and_then(|class| class.index()) {
            Some(class) => {
                x.push(example.values);
                y.push(class);
            }
            None => issues.push(RowIssue {
                line: position as u64 + 1,
                reason: format!("{} '{}' has no training class", LABEL_COLUMN, example.label),
            }),
        }
    }

    if !issues.is_empty() {
        return Err(TrainingError::InvalidRows(issues));
    }
    Ok((x, y))
}

/// Count of examples per known label, in class order
pub fn class_counts(examples: &[TrainingExample]) -> Vec<(AlertLabel, usize)> {
    AlertLabel::known()
        .iter()
        .map(|label| (*label, examples.iter().filter(|e| e.label == *label).count()))
        .collect()
}

struct Columns {
    features: [usize; FEATURE_COUNT],
    label: usize,
}

fn column_indices(headers: &StringRecord) -> Result<Columns, TrainingError> {
    let find = |name: &str| headers.iter().position(|h| h == name);

    let mut missing = Vec::new();
    let mut features = [0usize; FEATURE_COUNT];
    for (slot, name) in features.iter_mut().zip(FEATURE_LAYOUT.iter().copied()) {
        match find(name) {
            Some(index) => *slot = index,
            None => missing.push(name.to_string()),
        }
    }
    let label = find(LABEL_COLUMN);
    if label.is_none() {
        missing.push(LABEL_COLUMN.to_string());
    }

    match label {
        Some(label) if missing.is_empty() => Ok(Columns { features, label }),
        _ => Err(TrainingError::MissingColumns(missing)),
    }
}

fn parse_example(record: &StringRecord, columns: &Columns) -> Result<TrainingExample, String> {
    let mut values = [0.0f64; FEATURE_COUNT];
    for ((slot, index), name) in values.iter_mut().zip(columns.features).zip(FEATURE_LAYOUT.iter().copied()) {
        let raw = record.get(index).unwrap_or("");
        if raw.is_empty() {
            return Err(format!("missing value for '{}'", name));
        }
        *slot = raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("non-numeric value '{}' for '{}'", raw, name))?;
    }

    let raw_label = record.get(columns.label).unwrap_or("");
    let label = AlertLabel::parse_known(raw_label)
        .ok_or_else(|| format!("unknown {} '{}'", LABEL_COLUMN, raw_label))?;

    Ok(TrainingExample { values, label })
}
