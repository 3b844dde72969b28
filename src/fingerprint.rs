//! Structural fingerprinting of monitored files.

use crate::detector::ComparisonPolicy;
use crate::errors::FingerprintError;
use crate::snapshot::FileRecord;
use crate::utils::hash;
use std::fs::Metadata;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Computes a fresh fingerprint for one monitored path.
///
/// Reads filesystem metadata and, under a content-hash policy, the full file
/// content (raw bytes, see [`crate::utils::hash`]). Never mutates any
/// persisted state.
///
/// # Errors
/// [`FingerprintError::NotAccessible`] if the path cannot be stat'ed,
/// [`FingerprintError::Unreadable`] if the content cannot be read after the
/// stat succeeded.
pub fn fingerprint(path: &Path, policy: ComparisonPolicy) -> Result<FileRecord, FingerprintError> {
    let metadata = std::fs::metadata(path).map_err(|source| FingerprintError::NotAccessible {
        path: path.to_path_buf(),
        source,
    })?;

    let content_hash = if policy.use_content_hash {
        let digest = hash::hash_file(path).map_err(|source| FingerprintError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Some(digest)
    } else {
        None
    };

    Ok(FileRecord {
        path: path.to_path_buf(),
        size: metadata.len(),
        mtime: unix_seconds(metadata.modified().ok()).unwrap_or(0),
        atime: unix_seconds(metadata.accessed().ok()),
        ctime: unix_seconds(created_time(&metadata)),
        content_hash,
    })
}

/// Creation time is not reported on every platform or filesystem.
fn created_time(metadata: &Metadata) -> Option<SystemTime> {
    metadata.created().ok()
}

fn unix_seconds(time: Option<SystemTime>) -> Option<i64> {
    time.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}
