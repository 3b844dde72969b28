//! The per-invocation sweep: fingerprint, classify, dispatch, persist.
//!
//! One sequential pass over the monitored-file list. Per-file failures are
//! recorded and never abort the sweep; every remaining path is still
//! processed. The accumulated fresh fingerprints replace the baseline
//! wholesale at the end of the run.

use crate::config::Config;
use crate::detector::{self, Verdict};
use crate::errors::{DispatchError, FingerprintError, StoreError};
use crate::fingerprint::fingerprint;
use crate::repository::Repository;
use crate::snapshot::Snapshot;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Any error recorded against a single path during a sweep.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SweepError {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Fingerprint(e) => e.kind(),
            Self::Dispatch(e) => e.kind(),
            Self::Store(_) => "unwritable",
        }
    }
}

/// One recorded failure: the offending path and what went wrong.
#[derive(Debug)]
pub struct SweepFailure {
    pub path: PathBuf,
    pub error: SweepError,
}

/// Outcome of one sweep.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Verdict per monitored path, in list order. Paths whose fingerprint
    /// failed are absent here and present in `failures`.
    pub verdicts: Vec<(PathBuf, Verdict)>,
    /// Every per-file error and any snapshot-store error.
    pub failures: Vec<SweepFailure>,
    /// Whether the new baseline reached disk.
    pub snapshot_saved: bool,
}

impl SweepReport {
    /// Counts of (unseen, unchanged, changed) verdicts.
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        let mut unseen = 0;
        let mut unchanged = 0;
        let mut changed = 0;
        for (_, verdict) in &self.verdicts {
            match verdict {
                Verdict::Unseen => unseen += 1,
                Verdict::Unchanged => unchanged += 1,
                Verdict::Changed => changed += 1,
            }
        }
        (unseen, unchanged, changed)
    }

    /// True when no error of any kind was recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs one full sweep over the monitored paths.
///
/// With a repository, `Changed` files are dispatched and the fresh
/// fingerprints are persisted as the new baseline. Without one (`None`),
/// this is a dry run: files are classified but nothing is dispatched and
/// the baseline on disk is left untouched.
pub fn execute(
    config: &Config,
    watchlist: &[PathBuf],
    repository: Option<&dyn Repository>,
) -> SweepReport {
    let policy = config.policy();
    info!(
        monitored = watchlist.len(),
        db = %config.core.db_path.display(),
        content_hash = policy.use_content_hash,
        dry_run = repository.is_none(),
        "sweep started"
    );

    let baseline = Snapshot::load(&config.core.db_path);
    let mut next = Snapshot::new();
    let mut report = SweepReport::default();

    for path in watchlist {
        let record = match fingerprint(path, policy) {
            Ok(record) => record,
            Err(error) => {
                warn!(path = %path.display(), kind = error.kind(), %error, "fingerprint failed");
                report.failures.push(SweepFailure {
                    path: path.clone(),
                    error: error.into(),
                });
                continue;
            }
        };

        let verdict = detector::classify(&record, &baseline, policy);
        info!(path = %path.display(), verdict = verdict.as_str(), "classified");

        if verdict == Verdict::Changed
            && let Some(repository) = repository
            && let Err(error) = repository.deliver(path)
        {
            warn!(path = %path.display(), kind = error.kind(), %error, "dispatch failed");
            report.failures.push(SweepFailure {
                path: path.clone(),
                error: error.into(),
            });
        }

        next.insert(record);
        report.verdicts.push((path.clone(), verdict));
    }

    if repository.is_some() {
        match next.save(&config.core.db_path) {
            Ok(()) => report.snapshot_saved = true,
            Err(error) => {
                warn!(db = %config.core.db_path.display(), %error, "snapshot save failed");
                report.failures.push(SweepFailure {
                    path: config.core.db_path.clone(),
                    error: error.into(),
                });
            }
        }
    }

    let (unseen, unchanged, changed) = report.counts();
    info!(
        unseen,
        unchanged,
        changed,
        failures = report.failures.len(),
        "sweep finished"
    );
    report
}

/// Convenience lookup used by summary output.
#[must_use]
pub fn verdict_for<'a>(report: &'a SweepReport, path: &Path) -> Option<Verdict> {
    report
        .verdicts
        .iter()
        .find(|(p, _)| p == path)
        .map(|(_, v)| *v)
}
