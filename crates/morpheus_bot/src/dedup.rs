//! Persistent record of community posts already replied to.

use chrono::{DateTime, TimeDelta, Utc};
use morpheus_error::{StorageError, StorageErrorKind};
use morpheus_interface::Clock;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Tracks engaged content ids with time-based expiry.
///
/// The store is a JSON object mapping content id to the RFC 3339 time of
/// engagement. Every mutation rewrites the whole file through a temporary
/// file in the same directory followed by a rename, so a crash mid-write
/// leaves the previous contents intact.
pub struct DedupTracker {
    path: PathBuf,
    retention: TimeDelta,
    clock: Arc<dyn Clock>,
    records: BTreeMap<String, DateTime<Utc>>,
}

impl DedupTracker {
    /// Loads the store at `path`, dropping expired records.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty.
    #[instrument(skip(path, clock), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>, retention: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        let path = path.as_ref().to_path_buf();
        let records = match read_records(&path) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Dedup store unusable, starting empty");
                BTreeMap::new()
            }
        };

        let mut tracker = Self {
            path,
            retention,
            clock,
            records,
        };
        let expired = tracker.drop_expired();
        debug!(records = tracker.records.len(), expired, "Dedup store loaded");
        tracker
    }

    /// Check whether `content_id` was engaged within the retention window.
    pub fn already_engaged(&self, content_id: &str) -> bool {
        let now = self.clock.now();
        self.records
            .get(content_id)
            .is_some_and(|engaged_at| !self.is_expired(*engaged_at, now))
    }

    /// Records `content_id` as engaged now and persists the store.
    ///
    /// Expired records are dropped before the write. The in-memory record is
    /// kept even when the write fails.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the store could not be written.
    #[instrument(skip(self))]
    pub fn mark_engaged(&mut self, content_id: &str) -> Result<(), StorageError> {
        let expired = self.drop_expired();
        if expired > 0 {
            debug!(expired, "Dropped expired records");
        }
        self.records.insert(content_id.to_string(), self.clock.now());
        self.persist()
    }

    /// Drops expired records and rewrites the store.
    ///
    /// Returns the number of records removed.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the store could not be written.
    pub fn purge(&mut self) -> Result<usize, StorageError> {
        let removed = self.drop_expired();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records are held.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Location of the store on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_expired(&self, engaged_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(engaged_at) > self.retention
    }

    fn drop_expired(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.records.len();
        let retention = self.retention;
        self.records
            .retain(|_, engaged_at| now.signed_duration_since(*engaged_at) <= retention);
        before - self.records.len()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        let json = serde_json::to_vec_pretty(&self.records)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;

        let write_failed = |e: std::io::Error| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(write_failed)?;
        temp.write_all(&json).map_err(write_failed)?;
        temp.as_file().sync_all().map_err(write_failed)?;
        temp.persist(&self.path).map_err(|e| write_failed(e.error))?;

        debug!(records = self.records.len(), "Dedup store written");
        Ok(())
    }
}

fn read_records(path: &Path) -> Result<BTreeMap<String, DateTime<Utc>>, StorageError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    serde_json::from_str(&content)
        .map_err(|e| StorageError::new(StorageErrorKind::Parse(e.to_string())))
}
