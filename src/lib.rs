//! # Confsync - Configuration File Change Tracker
//!
//! Confsync watches a user-specified list of configuration files, detects
//! which ones changed since the last run, and forwards the changed files to
//! a backing repository: a plain directory tree, or a git working tree with
//! commit and push.
//!
//! One invocation is one sweep. The sweep loads the persisted baseline
//! snapshot, fingerprints every monitored file, classifies each one as
//! unseen, unchanged, or changed under the configured comparison policy,
//! dispatches the changed files, and persists the fresh fingerprints as the
//! new baseline. An external trigger (cron or similar) decides when runs
//! happen; confsync does no scheduling of its own.
//!
//! ## Architecture
//!
//! - [`fingerprint`]: computes size/mtime/digest fingerprints of single files
//! - [`snapshot`]: loads and atomically rewrites the persisted baseline
//! - [`detector`]: pure classification of a fingerprint against the baseline
//! - [`repository`]: dispatch backends (directory copy, git commit + push)
//! - [`sweep`]: the run loop tying the above together
//! - [`config`], [`watchlist`]: TOML settings and the monitored-file list
//!
//! ## Example
//!
//! ```no_run
//! use confsync::{config::Config, repository, sweep, watchlist};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::load(std::path::Path::new("config.toml"))?;
//! config.validate()?;
//! let files = watchlist::load(&config.core.file_list)?;
//! let repo = repository::open(&config.repository)?;
//! let report = sweep::execute(&config, &files, Some(repo.as_ref()));
//! assert!(report.is_clean());
//! # Ok(())
//! # }
//! ```

/// Configuration parsing and validation.
pub mod config;

/// Change classification against the baseline snapshot.
pub mod detector;

/// Error taxonomy for fingerprinting, storage, dispatch, and configuration.
pub mod errors;

/// Structural fingerprinting of monitored files.
pub mod fingerprint;

/// Repository backends for changed-file dispatch.
pub mod repository;

/// Persisted fingerprint baseline.
pub mod snapshot;

/// The per-invocation sweep loop.
pub mod sweep;

/// Utility helpers (hashing, path mapping).
pub mod utils;

/// Monitored-file list input.
pub mod watchlist;

/// Current version of the confsync binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to the home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/confsync/config.toml";
