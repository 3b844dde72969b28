//! Change classification against the baseline snapshot.
//!
//! Pure functions only: no I/O, no side effects, deterministic given the
//! inputs. Fingerprints come from [`crate::fingerprint`], the baseline from
//! [`crate::snapshot`].

use crate::snapshot::{FileRecord, Snapshot};
use serde::{Deserialize, Serialize};

/// The configured rule set determining which attribute differences count as
/// a change.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ComparisonPolicy {
    /// Compare content digests instead of size and mtime.
    pub use_content_hash: bool,
}

/// Classification of one monitored file against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No baseline entry exists for this path. Recorded into the new
    /// snapshot but not dispatched; it becomes a comparison candidate on
    /// the next run.
    Unseen,
    /// A baseline entry exists and nothing relevant differs.
    Unchanged,
    /// A baseline entry exists and the policy-relevant attributes differ.
    Changed,
}

impl Verdict {
    /// Short label for structured log events and summary output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unseen => "unseen",
            Self::Unchanged => "unchanged",
            Self::Changed => "changed",
        }
    }
}

/// Compares a freshly computed fingerprint against the baseline entry for
/// the same path.
///
/// Under a content-hash policy only the digests are compared; otherwise a
/// file is changed when its size or modification time differs.
#[must_use]
pub fn classify(current: &FileRecord, baseline: &Snapshot, policy: ComparisonPolicy) -> Verdict {
    let Some(prior) = baseline.get(&current.path) else {
        return Verdict::Unseen;
    };

    let differs = if policy.use_content_hash {
        current.content_hash != prior.content_hash
    } else {
        current.size != prior.size || current.mtime != prior.mtime
    };

    if differs {
        Verdict::Changed
    } else {
        Verdict::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const HASH_POLICY: ComparisonPolicy = ComparisonPolicy {
        use_content_hash: true,
    };
    const METADATA_POLICY: ComparisonPolicy = ComparisonPolicy {
        use_content_hash: false,
    };

    fn record(path: &str, size: u64, mtime: i64, hash: Option<&str>) -> FileRecord {
        FileRecord {
            path: PathBuf::from(path),
            size,
            mtime,
            atime: None,
            ctime: None,
            content_hash: hash.map(String::from),
        }
    }

    fn baseline_with(records: Vec<FileRecord>) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for r in records {
            snapshot.insert(r);
        }
        snapshot
    }

    #[test]
    fn test_unseen_when_no_baseline_entry() {
        let current = record("a.conf", 10, 1000, None);
        let verdict = classify(&current, &Snapshot::new(), METADATA_POLICY);
        assert_eq!(verdict, Verdict::Unseen);
    }

    #[test]
    fn test_unchanged_when_metadata_identical() {
        let baseline = baseline_with(vec![record("a.conf", 10, 1000, None)]);
        let current = record("a.conf", 10, 1000, None);
        assert_eq!(
            classify(&current, &baseline, METADATA_POLICY),
            Verdict::Unchanged
        );
    }

    #[test]
    fn test_changed_on_size_difference() {
        let baseline = baseline_with(vec![record("a.conf", 10, 1000, None)]);
        let current = record("a.conf", 12, 1000, None);
        assert_eq!(
            classify(&current, &baseline, METADATA_POLICY),
            Verdict::Changed
        );
    }

    #[test]
    fn test_changed_on_mtime_difference() {
        let baseline = baseline_with(vec![record("a.conf", 10, 1000, None)]);
        let current = record("a.conf", 10, 2000, None);
        assert_eq!(
            classify(&current, &baseline, METADATA_POLICY),
            Verdict::Changed
        );
    }

    #[test]
    fn test_hash_policy_ignores_metadata() {
        // Same digest, different mtime: a touched-but-identical file.
        let baseline = baseline_with(vec![record("a.conf", 10, 1000, Some("aaaa"))]);
        let current = record("a.conf", 10, 2000, Some("aaaa"));
        assert_eq!(
            classify(&current, &baseline, HASH_POLICY),
            Verdict::Unchanged
        );
    }

    #[test]
    fn test_hash_policy_detects_same_size_same_mtime_edit() {
        // Content rewritten in place with identical size and mtime: only the
        // hash policy can see it.
        let baseline = baseline_with(vec![record("a.conf", 10, 1000, Some("aaaa"))]);
        let current = record("a.conf", 10, 1000, Some("bbbb"));

        assert_eq!(classify(&current, &baseline, HASH_POLICY), Verdict::Changed);

        let baseline = baseline_with(vec![record("a.conf", 10, 1000, None)]);
        let current = record("a.conf", 10, 1000, None);
        assert_eq!(
            classify(&current, &baseline, METADATA_POLICY),
            Verdict::Unchanged
        );
    }

    #[test]
    fn test_hash_policy_with_hashless_baseline() {
        // Policy flipped on between runs: the old record carries no digest,
        // so the first hashed run reports a change.
        let baseline = baseline_with(vec![record("a.conf", 10, 1000, None)]);
        let current = record("a.conf", 10, 1000, Some("aaaa"));
        assert_eq!(classify(&current, &baseline, HASH_POLICY), Verdict::Changed);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let baseline = baseline_with(vec![record("a.conf", 10, 1000, None)]);
        let current = record("a.conf", 12, 1000, None);
        let first = classify(&current, &baseline, METADATA_POLICY);
        let second = classify(&current, &baseline, METADATA_POLICY);
        assert_eq!(first, second);
    }
}
