use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::record::{LogRecord, LOG_HEADER};

/// Failure reading or writing the reading log
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Reading log I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Reading log CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Reading log header mismatch: expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// Append-only CSV log of classified readings.
///
/// Appends are serialized through the writer mutex. `read_all` does not take
/// the mutex, so it may miss rows appended while it runs.
pub struct ReadingLog {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl ReadingLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    /// Construct and initialize in one step
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let log = Self::new(path);
        log.initialize()?;
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with its header if absent or empty.
    ///
    /// Idempotent; returns `true` when the header was written by this call.
    /// An existing file with any other header is rejected.
    pub fn initialize(&self) -> Result<bool, StorageError> {
        let _guard = self.file.lock();
        let created = self.ensure_header()?;

        if created {
            log::info!("Reading log created: {}", self.path.display());
        } else {
            log::info!("Reading log reused: {}", self.path.display());
        }
        Ok(created)
    }

    /// Append one row without touching existing content
    pub fn append(&self, record: &LogRecord) -> Result<(), StorageError> {
        let mut file_guard = self.file.lock();

        if file_guard.is_none() {
            self.ensure_header()?;
            let f = OpenOptions::new().append(true).open(&self.path)?;
            *file_guard = Some(f);
        }

        let line = encode_row(&record.to_row())?;
        if let Some(file) = file_guard.as_mut() {
            // one write per row keeps rows whole under O_APPEND
            if let Err(e) = file.write_all(&line).and_then(|_| file.flush()) {
                *file_guard = None;
                return Err(e.into());
            }
        }

        Ok(())
    }

    /// Every record in file order. An empty log yields an empty vector.
    pub fn read_all(&self) -> Result<Vec<LogRecord>, StorageError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        check_header(&headers)?;

        let records = reader
            .deserialize::<LogRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Number of records currently in the log
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read_all()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    /// Write the header if the file is missing or zero-length.
    /// Caller must hold the writer mutex.
    fn ensure_header(&self) -> Result<bool, StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        if needs_header {
            let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            file.write_all(&encode_row(&LOG_HEADER)?)?;
            file.flush()?;
        } else {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(true)
                .trim(csv::Trim::All)
                .from_path(&self.path)?;
            check_header(reader.headers()?)?;
        }

        Ok(needs_header)
    }
}

fn check_header(headers: &csv::StringRecord) -> Result<(), StorageError> {
    if headers.iter().ne(LOG_HEADER.iter().copied()) {
        return Err(StorageError::HeaderMismatch {
            expected: LOG_HEADER.iter().map(|h| h.to_string()).collect(),
            found: headers.iter().map(|h| h.to_string()).collect(),
        });
    }
    Ok(())
}

fn encode_row<I, T>(cells: I) -> Result<Vec<u8>, StorageError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(cells)?;
    writer.into_inner().map_err(|e| StorageError::Io(e.into_error()))
}
