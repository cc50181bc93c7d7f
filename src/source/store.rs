//! Snapshot store.
//!
//! Keeps the previous counter snapshot of each monitored Recursor in the
//! scratch directory, one file per virtual configuration. Each invocation
//! loads the previous snapshot and overwrites it with the current one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use recwatch_types::{CounterSnapshot, RecordError, SnapshotRecord};

/// File name of the record for the default configuration.
pub const RECORD_PREFIX: &str = "monitor-pdns-rec";

/// Errors reading or writing the stored snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not write measurement to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read measurement from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt measurement in {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("Measurement in {} has incompatible schema {version}", path.display())]
    Incompatible { path: PathBuf, version: u32 },
}

/// Single-slot persistence of the previous snapshot.
///
/// There is no locking: two invocations for the same configuration at the
/// same time simply race, and the last writer wins.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store for the given configuration name inside `scratch`.
    ///
    /// An absent or empty configuration name maps to the default record.
    pub fn new<P: AsRef<Path>>(scratch: P, config_name: Option<&str>) -> Self {
        Self {
            path: scratch.as_ref().join(record_name(config_name)),
        }
    }

    /// Returns the path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previous snapshot, or an empty one if there is no usable
    /// history.
    ///
    /// Corrupt and incompatible records are logged and then treated like a
    /// first run.
    pub fn load(&self) -> CounterSnapshot {
        match self.try_load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!(path = %self.path.display(), "no previous measurement");
                CounterSnapshot::default()
            }
            Err(e) => {
                warn!(error = %e, "ignoring previous measurement");
                CounterSnapshot::default()
            }
        }
    }

    /// Load the previous snapshot, distinguishing why it is unavailable.
    ///
    /// Returns `Ok(None)` when no record exists yet.
    pub fn try_load(&self) -> Result<Option<CounterSnapshot>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match SnapshotRecord::from_bytes(&bytes) {
            Ok(record) => Ok(Some(record.into())),
            Err(RecordError::Incompatible(version)) => Err(StoreError::Incompatible {
                path: self.path.clone(),
                version,
            }),
            Err(RecordError::Malformed(reason)) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                reason,
            }),
        }
    }

    /// Replace the stored snapshot.
    pub fn save(&self, snapshot: &CounterSnapshot) -> Result<(), StoreError> {
        let write_error = |source: io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let bytes = SnapshotRecord::from(snapshot)
            .to_bytes()
            .map_err(|e| write_error(io::Error::other(e.to_string())))?;
        fs::write(&self.path, bytes).map_err(write_error)?;

        debug!(path = %self.path.display(), counters = snapshot.len(), "saved measurement");
        Ok(())
    }
}

/// Record file name for a configuration.
pub fn record_name(config_name: Option<&str>) -> String {
    match config_name.filter(|name| !name.is_empty()) {
        Some(name) => format!("{}-{}", RECORD_PREFIX, name),
        None => RECORD_PREFIX.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> CounterSnapshot {
        CounterSnapshot::builder()
            .timestamp(1_700_000_000)
            .counter("questions", 4200)
            .counter("cache-hits", 310)
            .counter("security-status", 1)
            .build()
    }

    #[test]
    fn test_record_names() {
        assert_eq!(record_name(None), "monitor-pdns-rec");
        assert_eq!(record_name(Some("")), "monitor-pdns-rec");
        assert_eq!(record_name(Some("edge")), "monitor-pdns-rec-edge");
    }

    #[test]
    fn test_store_path() {
        let store = SnapshotStore::new("/tmp", Some("edge"));
        assert_eq!(store.path(), Path::new("/tmp/monitor-pdns-rec-edge"));
    }

    #[test]
    fn test_missing_record_is_no_history() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path(), None);

        assert!(store.try_load().unwrap().is_none());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path(), Some("edge"));

        store.save(&sample()).unwrap();

        assert!(dir.path().join("monitor-pdns-rec-edge").exists());
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path(), None);

        store.save(&sample()).unwrap();
        let newer = CounterSnapshot::watched([("questions", 5000)], 1_700_000_060);
        store.save(&newer).unwrap();

        assert_eq!(store.load(), newer);
    }

    #[test]
    fn test_configurations_are_separate() {
        let dir = TempDir::new().unwrap();
        let default = SnapshotStore::new(dir.path(), None);
        let edge = SnapshotStore::new(dir.path(), Some("edge"));

        edge.save(&sample()).unwrap();

        assert!(default.load().is_empty());
        assert_eq!(edge.load(), sample());
    }

    #[test]
    fn test_corrupt_record_is_detected_but_not_fatal() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path(), None);
        fs::write(store.path(), b"(dp0\nS'questions'\np1\nI42\ns.").unwrap();

        assert!(matches!(store.try_load(), Err(StoreError::Corrupt { .. })));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_incompatible_record_is_detected_but_not_fatal() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path(), None);
        let mut record = SnapshotRecord::from(&sample());
        record.version += 1;
        fs::write(store.path(), record.to_bytes().unwrap()).unwrap();

        assert!(matches!(
            store.try_load(),
            Err(StoreError::Incompatible { .. })
        ));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_unwritable_directory_is_fatal() {
        let store = SnapshotStore::new("/nonexistent/scratch", None);

        let err = store.save(&sample()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not write measurement to /nonexistent/scratch/monitor-pdns-rec"
        );
    }
}
