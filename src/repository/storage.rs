use super::Repository;
use crate::errors::DispatchError;
use crate::utils::paths;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Copies changed files into a destination root.
pub struct StorageRepository {
    root: PathBuf,
    preserve_structure: bool,
}

impl StorageRepository {
    #[must_use]
    pub fn new(root: &Path, preserve_structure: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            preserve_structure,
        }
    }

    /// Where a monitored path lands under the root.
    #[must_use]
    pub fn destination(&self, source: &Path) -> PathBuf {
        if self.preserve_structure {
            self.root.join(paths::mirror_relative(source))
        } else {
            let name = source.file_name().unwrap_or(source.as_os_str());
            self.root.join(name)
        }
    }
}

impl Repository for StorageRepository {
    fn deliver(&self, source: &Path) -> Result<(), DispatchError> {
        let dest = self.destination(source);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| DispatchError::DestinationUnavailable {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::copy(source, &dest).map_err(|e| DispatchError::CopyFailed {
            path: source.to_path_buf(),
            source: e,
        })?;

        debug!(source = %source.display(), dest = %dest.display(), "delivered");
        Ok(())
    }
}
