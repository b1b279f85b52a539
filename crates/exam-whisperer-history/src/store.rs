//! History store implementations.

use crate::error::HistoryError;
use async_trait::async_trait;
use chrono::Utc;
use exam_whisperer_protocol::{QuizAttempt, SessionRecord};
use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[async_trait]
/// Append-only log of session records.
pub trait HistoryStore: Send + Sync {
    /// Append a record to the end of the log.
    async fn append(&self, record: SessionRecord) -> Result<(), HistoryError>;

    /// Create a record stamped by the store and append it.
    ///
    /// Timestamps never go backwards relative to the last stored record.
    async fn record(
        &self,
        question: &str,
        answer: &str,
        quiz_attempt: Option<QuizAttempt>,
    ) -> Result<SessionRecord, HistoryError>;

    /// Return every record in append order.
    async fn read_all(&self) -> Result<Vec<SessionRecord>, HistoryError>;

    /// Remove every record. Returns whether there was anything to remove.
    async fn clear(&self) -> Result<bool, HistoryError>;
}

/// History store backed by one JSON file holding the full record array.
///
/// Every operation runs under a single lock, so concurrent requests in one
/// process cannot lose appends. Other processes writing the same file are not
/// coordinated with.
#[derive(Debug)]
pub struct FileHistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileHistoryStore {
    /// Create a store for the given file. The file is created on first append.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        info!("initialized file history store (path={})", path.display());
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored entry, recovering to an empty log when the file is
    /// not a JSON array.
    fn load_entries(&self) -> Result<Vec<StoredEntry>, HistoryError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(HistoryError::Io(err)),
        };
        match serde_json::from_str::<Vec<Value>>(&contents) {
            Ok(values) => Ok(values.into_iter().map(StoredEntry::decode).collect()),
            Err(err) => {
                warn!(
                    "history file is corrupted or empty; starting with an empty history (path={}): {err}",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    /// Decoded records in file order. Entries that do not decode are skipped
    /// here but kept on disk.
    fn records_of(&self, entries: &[StoredEntry]) -> Vec<SessionRecord> {
        entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry {
                StoredEntry::Record(record) => Some(record.clone()),
                StoredEntry::Raw(_) => {
                    warn!(
                        "skipping undecodable history entry (path={}, index={index})",
                        self.path.display()
                    );
                    None
                }
            })
            .collect()
    }

    /// Rewrite the backing file with every entry.
    ///
    /// Writes in place: a crash mid-write can leave a truncated file behind.
    fn write_entries(&self, entries: &[StoredEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        entries.serialize(&mut serializer)?;
        let mut file = fs::File::create(&self.path)?;
        file.write_all(&buffer)?;
        Ok(())
    }

    fn append_locked(&self, record: SessionRecord) -> Result<usize, HistoryError> {
        let mut entries = self.load_entries()?;
        entries.push(StoredEntry::Record(record));
        self.write_entries(&entries)?;
        Ok(entries.len())
    }
}

/// One element of the history array.
///
/// Elements that do not decode as a [`SessionRecord`] are carried through
/// rewrites untouched.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum StoredEntry {
    Record(SessionRecord),
    Raw(Value),
}

impl StoredEntry {
    fn decode(value: Value) -> Self {
        match SessionRecord::deserialize(&value) {
            Ok(record) => Self::Record(record),
            Err(_) => Self::Raw(value),
        }
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn append(&self, record: SessionRecord) -> Result<(), HistoryError> {
        let _guard = self.lock.lock();
        let total = self.append_locked(record)?;
        debug!(
            "appended session record (path={}, total={total})",
            self.path.display()
        );
        Ok(())
    }

    async fn record(
        &self,
        question: &str,
        answer: &str,
        quiz_attempt: Option<QuizAttempt>,
    ) -> Result<SessionRecord, HistoryError> {
        let _guard = self.lock.lock();
        let mut entries = self.load_entries()?;
        let now = Utc::now();
        let timestamp = entries
            .iter()
            .rev()
            .find_map(|entry| match entry {
                StoredEntry::Record(last) => Some(last.timestamp.max(now)),
                StoredEntry::Raw(_) => None,
            })
            .unwrap_or(now);
        let record = SessionRecord::at(timestamp, question, answer, quiz_attempt);
        entries.push(StoredEntry::Record(record.clone()));
        self.write_entries(&entries)?;
        info!(
            "session logged (path={}, total={}, quiz_attempt={})",
            self.path.display(),
            entries.len(),
            record.quiz_attempt.is_some()
        );
        Ok(record)
    }

    async fn read_all(&self) -> Result<Vec<SessionRecord>, HistoryError> {
        let _guard = self.lock.lock();
        let entries = self.load_entries()?;
        let records = self.records_of(&entries);
        debug!(
            "read session history (path={}, returned={})",
            self.path.display(),
            records.len()
        );
        Ok(records)
    }

    async fn clear(&self) -> Result<bool, HistoryError> {
        let _guard = self.lock.lock();
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("all sessions cleared (path={})", self.path.display());
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("no history file found to clear (path={})", self.path.display());
                Ok(false)
            }
            Err(err) => Err(HistoryError::Io(err)),
        }
    }
}
