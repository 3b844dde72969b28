use std::path::PathBuf;
use thiserror::Error;

/// Failure to fingerprint a single monitored file.
#[derive(Error, Debug)]
pub enum FingerprintError {
    /// The path could not be stat'ed (missing file, permission denied).
    #[error("cannot stat {path}: {source}")]
    NotAccessible {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The stat succeeded but the content could not be opened or read.
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FingerprintError {
    /// Short kind label for structured log events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotAccessible { .. } => "not-accessible",
            Self::Unreadable { .. } => "unreadable",
        }
    }
}

/// Failure to persist the baseline snapshot.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Unrecoverable I/O while writing the snapshot (disk full, permissions).
    #[error("cannot write snapshot {path}: {source}")]
    Unwritable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failure to deliver one changed file to the repository backend.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The destination directory could not be created.
    #[error("cannot create destination directory {path}: {source}")]
    DestinationUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file copy itself failed (source vanished mid-run, permissions).
    #[error("cannot copy {path}: {source}")]
    CopyFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The version-control commit or push step failed.
    #[error("{message}")]
    PushFailed { message: String },
}

impl DispatchError {
    /// Short kind label for structured log events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DestinationUnavailable { .. } => "destination-unavailable",
            Self::CopyFailed { .. } => "copy-failed",
            Self::PushFailed { .. } => "push-failed",
        }
    }
}

/// Configuration precondition failures. Fatal before any sweep work starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("repository.path is not set; refusing to run without a dispatch destination")]
    MissingRepositoryPath,
}
