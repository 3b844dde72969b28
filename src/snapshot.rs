//! Persisted fingerprint baseline.
//!
//! The snapshot is the only durable state the sweep owns: a JSON object
//! mapping each monitored path to the fingerprint recorded at the end of the
//! previous run. It is read once at the start of a run and replaced wholesale
//! at the end. A missing, unreadable, or malformed database degrades to an
//! empty baseline, because a run with no prior baseline is a normal first
//! run, not a failure.

use crate::errors::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// One fingerprint of one monitored path.
///
/// `atime` and `ctime` are informational only and never consulted by the
/// change detector. The content digest is stored under the legacy `md5` key;
/// the algorithm is XXH3-128, which produces the same 32-char hex width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Monitored path; the snapshot map key, not serialized in the value.
    #[serde(skip)]
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
    /// Unix timestamp of last modification.
    pub mtime: i64,
    /// Unix timestamp of last access, when the platform reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atime: Option<i64>,
    /// Unix timestamp of creation, when the platform reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctime: Option<i64>,
    /// Content digest, present iff content-hash comparison was enabled.
    #[serde(rename = "md5", default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

/// The fingerprint baseline recorded at the end of the previous run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: BTreeMap<PathBuf, FileRecord>,
}

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the baseline from `db_path`, degrading to an empty snapshot.
    ///
    /// An absent database is a first run and logged at debug level; an
    /// unreadable or malformed one is logged as a warning. Neither aborts
    /// the run.
    #[must_use]
    pub fn load(db_path: &Path) -> Self {
        let data = match std::fs::read(db_path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(db = %db_path.display(), "no baseline snapshot, treating as first run");
                return Self::new();
            }
            Err(e) => {
                warn!(db = %db_path.display(), error = %e, "baseline snapshot unreadable, starting from empty");
                return Self::new();
            }
        };

        match serde_json::from_slice::<BTreeMap<PathBuf, FileRecord>>(&data) {
            Ok(mut entries) => {
                for (path, record) in &mut entries {
                    record.path.clone_from(path);
                }
                Self { entries }
            }
            Err(e) => {
                warn!(db = %db_path.display(), error = %e, "baseline snapshot malformed, starting from empty");
                Self::new()
            }
        }
    }

    /// Saves the snapshot to `db_path`, replacing prior content.
    ///
    /// Keys serialize in deterministic order. The content is written to a
    /// temporary file in the same directory and renamed into place, so a
    /// failed write never leaves a truncated database visible.
    ///
    /// # Errors
    /// Returns [`StoreError::Unwritable`] on unrecoverable I/O conditions.
    pub fn save(&self, db_path: &Path) -> Result<(), StoreError> {
        let unwritable = |source: io::Error| StoreError::Unwritable {
            path: db_path.to_path_buf(),
            source,
        };

        let json =
            serde_json::to_vec_pretty(&self.entries).map_err(|e| unwritable(io::Error::other(e)))?;

        let dir = db_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(unwritable)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(unwritable)?;
        tmp.write_all(&json).map_err(unwritable)?;
        tmp.persist(db_path).map_err(|e| unwritable(e.error))?;
        Ok(())
    }

    pub fn insert(&mut self, record: FileRecord) {
        self.entries.insert(record.path.clone(), record);
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&FileRecord> {
        self.entries.get(path)
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &FileRecord)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(path: &str, size: u64, mtime: i64, hash: Option<&str>) -> FileRecord {
        FileRecord {
            path: PathBuf::from(path),
            size,
            mtime,
            atime: Some(mtime),
            ctime: Some(mtime - 100),
            content_hash: hash.map(String::from),
        }
    }

    #[test]
    fn test_save_load_round_trip() -> Result<(), StoreError> {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("db.json");

        let mut snapshot = Snapshot::new();
        snapshot.insert(record("a.conf", 10, 1_700_000_000, Some("0123abcd")));
        snapshot.insert(record("subdir/b.conf", 20, 1_700_000_100, None));

        snapshot.save(&db_path)?;
        let loaded = Snapshot::load(&db_path);

        assert_eq!(loaded, snapshot);
        assert_eq!(
            loaded.get(Path::new("a.conf")).unwrap().path,
            PathBuf::from("a.conf")
        );
        Ok(())
    }

    #[test]
    fn test_load_missing_db_is_empty() {
        let dir = tempdir().unwrap();
        let loaded = Snapshot::load(&dir.path().join("absent.json"));
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_malformed_db_is_empty() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("db.json");
        std::fs::write(&db_path, b"{not valid json").unwrap();

        assert!(Snapshot::load(&db_path).is_empty());
    }

    #[test]
    fn test_load_empty_file_is_empty() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("db.json");
        std::fs::write(&db_path, b"").unwrap();

        assert!(Snapshot::load(&db_path).is_empty());
    }

    #[test]
    fn test_save_replaces_prior_content() -> Result<(), StoreError> {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("db.json");

        let mut first = Snapshot::new();
        first.insert(record("a.conf", 10, 1000, None));
        first.insert(record("b.conf", 20, 2000, None));
        first.save(&db_path)?;

        let mut second = Snapshot::new();
        second.insert(record("a.conf", 12, 3000, None));
        second.save(&db_path)?;

        let loaded = Snapshot::load(&db_path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(Path::new("a.conf")).unwrap().size, 12);
        assert!(!loaded.contains(Path::new("b.conf")));
        Ok(())
    }

    #[test]
    fn test_serialized_format_uses_md5_key() -> Result<(), StoreError> {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("db.json");

        let mut snapshot = Snapshot::new();
        snapshot.insert(record("a.conf", 10, 1000, Some("feedface")));
        snapshot.save(&db_path)?;

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&db_path).unwrap()).unwrap();
        let entry = &raw["a.conf"];
        assert_eq!(entry["size"], 10);
        assert_eq!(entry["mtime"], 1000);
        assert_eq!(entry["md5"], "feedface");
        assert!(entry.get("path").is_none());
        Ok(())
    }

    #[test]
    fn test_hashless_record_omits_digest_key() -> Result<(), StoreError> {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("db.json");

        let mut snapshot = Snapshot::new();
        snapshot.insert(record("a.conf", 10, 1000, None));
        snapshot.save(&db_path)?;

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&db_path).unwrap()).unwrap();
        assert!(raw["a.conf"].get("md5").is_none());
        Ok(())
    }

    #[test]
    fn test_save_to_unwritable_dir_fails() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(record("a.conf", 10, 1000, None));

        let result = snapshot.save(Path::new("/proc/confsync-no-such/db.json"));
        assert!(matches!(result, Err(StoreError::Unwritable { .. })));
    }
}
