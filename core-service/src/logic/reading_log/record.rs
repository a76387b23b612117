use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureVector;
use crate::logic::model::AlertLabel;

/// Fixed column order of the reading log
pub const LOG_HEADER: [&str; 6] = [
    "timestamp",
    "flame",
    "smoke",
    "temperature",
    "humidity",
    "alert_intensity",
];

/// One classified reading
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogRecord {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,

    // Echoed input
    pub flame: f64,
    pub smoke: f64,
    pub temperature: f64,
    pub humidity: f64,

    pub alert_intensity: AlertLabel,
}

impl LogRecord {
    /// Record stamped with the server's local clock, second precision
    pub fn new(vector: &FeatureVector, alert_intensity: AlertLabel) -> Self {
        let now = Local::now().naive_local();
        let timestamp = now.with_nanosecond(0).unwrap_or(now);
        Self::with_timestamp(timestamp, vector, alert_intensity)
    }

    pub fn with_timestamp(
        timestamp: NaiveDateTime,
        vector: &FeatureVector,
        alert_intensity: AlertLabel,
    ) -> Self {
        let [flame, smoke, temperature, humidity] = *vector.as_array();
        Self {
            timestamp,
            flame,
            smoke,
            temperature,
            humidity,
            alert_intensity,
        }
    }

    /// CSV cells in `LOG_HEADER` order; numbers in shortest form (`1`, `45.5`)
    pub(crate) fn to_row(&self) -> [String; 6] {
        [
            timestamp_format::format(&self.timestamp),
            self.flame.to_string(),
            self.smoke.to_string(),
            self.temperature.to_string(),
            self.humidity.to_string(),
            self.alert_intensity.to_string(),
        ]
    }
}

/// `YYYY-MM-DD HH:MM:SS` in both the CSV file and JSON output
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::constants::TIMESTAMP_FORMAT;

    pub fn format(timestamp: &NaiveDateTime) -> String {
        timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(timestamp))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
