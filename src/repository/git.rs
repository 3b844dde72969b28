use super::{Repository, StorageRepository};
use crate::errors::DispatchError;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Copies changed files into a git working tree, then commits and pushes.
///
/// The working tree and its remote are managed externally; this backend only
/// invokes the git client in that tree. A push without a configured remote
/// surfaces as a per-file dispatch failure, not a fatal error.
pub struct GitRepository {
    worktree: PathBuf,
    store: StorageRepository,
}

impl GitRepository {
    #[must_use]
    pub fn new(worktree: &Path, preserve_structure: bool) -> Self {
        Self {
            worktree: worktree.to_path_buf(),
            store: StorageRepository::new(worktree, preserve_structure),
        }
    }

    fn run_git(&self, args: &[&str]) -> Result<(), DispatchError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.worktree)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| DispatchError::PushFailed {
                message: format!("failed to invoke git: {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DispatchError::PushFailed {
                message: format!(
                    "git {} failed in {}: {}",
                    args.first().copied().unwrap_or_default(),
                    self.worktree.display(),
                    stderr.trim()
                ),
            });
        }
        Ok(())
    }

    /// `git diff --cached --quiet` exits 1 when the index differs from HEAD.
    fn has_staged_changes(&self) -> Result<bool, DispatchError> {
        let status = Command::new("git")
            .args(["diff", "--cached", "--quiet"])
            .current_dir(&self.worktree)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| DispatchError::PushFailed {
                message: format!("failed to invoke git: {e}"),
            })?;

        match status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(DispatchError::PushFailed {
                message: format!("git diff --cached failed in {}", self.worktree.display()),
            }),
        }
    }

    fn has_remote(&self) -> bool {
        Command::new("git")
            .args(["remote", "get-url", "origin"])
            .current_dir(&self.worktree)
            .stdin(Stdio::null())
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Repository for GitRepository {
    fn deliver(&self, source: &Path) -> Result<(), DispatchError> {
        self.store.deliver(source)?;

        self.run_git(&["add", "-A"])?;

        // A re-dispatch of identical bytes stages nothing; committing would
        // fail with an empty index.
        if !self.has_staged_changes()? {
            debug!(source = %source.display(), "working tree already current, nothing to commit");
            return Ok(());
        }

        let message = format!("confsync: update {}", source.display());
        self.run_git(&["commit", "-m", &message])?;

        if self.has_remote() {
            self.run_git(&["push"])?;
        } else {
            debug!(worktree = %self.worktree.display(), "no origin remote, commit kept local");
        }
        Ok(())
    }
}
