//! Repository backends for changed-file dispatch.

/// Git working-tree backend with commit and push.
pub mod git;
/// Plain directory-copy backend.
pub mod storage;

pub use git::GitRepository;
pub use storage::StorageRepository;

use crate::config::{RepositoryConfig, RepositoryKind};
use crate::errors::{ConfigError, DispatchError};
use std::path::Path;

/// A destination for changed files.
pub trait Repository {
    /// Delivers one changed file to the backend.
    ///
    /// # Errors
    /// Returns a [`DispatchError`] describing why this file could not be
    /// delivered. Dispatch failures are per-file conditions; the sweep
    /// continues with the remaining monitored paths.
    fn deliver(&self, source: &Path) -> Result<(), DispatchError>;
}

/// Opens the backend named by the configuration.
///
/// # Errors
/// [`ConfigError::MissingRepositoryPath`] if no destination is configured.
pub fn open(config: &RepositoryConfig) -> Result<Box<dyn Repository>, ConfigError> {
    if config.path.as_os_str().is_empty() {
        return Err(ConfigError::MissingRepositoryPath);
    }
    Ok(match config.kind {
        RepositoryKind::Storage => Box::new(StorageRepository::new(
            &config.path,
            config.preserve_structure,
        )),
        RepositoryKind::Git => {
            Box::new(GitRepository::new(&config.path, config.preserve_structure))
        }
    })
}
