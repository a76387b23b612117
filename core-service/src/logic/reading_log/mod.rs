//! Reading Log - persisted history of classified readings
//!
//! CSV file with a fixed header, appended once per successful prediction and
//! read back in full for the dashboard.

pub mod record;
pub mod writer;


pub use record::{LogRecord, LOG_HEADER};
pub use writer::{ReadingLog, StorageError};
