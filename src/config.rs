//! Configuration parsing and validation.
//!
//! A TOML file with `[core]`, `[comparison]`, and `[repository]` sections.
//! Every section has defaults; a default file is written on first load so
//! users have something to edit.

use crate::detector::ComparisonPolicy;
use crate::errors::ConfigError;
use crate::utils::paths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,

    #[serde(default)]
    pub comparison: ComparisonConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Path of the persisted baseline snapshot.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Path of the monitored-file list.
    #[serde(default = "default_file_list")]
    pub file_list: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Compare content digests instead of size and mtime.
    #[serde(default = "default_use_content_hash")]
    pub use_content_hash: bool,
}

/// Which backend receives changed files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    /// Plain directory copy.
    #[default]
    Storage,
    /// Directory copy into a git working tree, then commit and push.
    #[serde(alias = "versioncontrol")]
    Git,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub kind: RepositoryKind,

    /// Destination root (or git working tree). Required.
    #[serde(default)]
    pub path: PathBuf,

    /// Recreate each file's directory structure under the root instead of
    /// dropping everything in flat.
    #[serde(default = "default_preserve_structure")]
    pub preserve_structure: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        Self {
            db_path: base.join(".confsync").join("db.json"),
            file_list: base.join(".confsync").join("file.list"),
        }
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            use_content_hash: default_use_content_hash(),
        }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            kind: RepositoryKind::default(),
            path: PathBuf::new(),
            preserve_structure: default_preserve_structure(),
        }
    }
}

impl Config {
    /// Load configuration from a file, creating a default one if absent.
    ///
    /// Tilde prefixes in the configured paths expand to the home directory.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, written, or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Self = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        config.core.db_path = paths::expand_tilde(&config.core.db_path)?;
        config.core.file_list = paths::expand_tilde(&config.core.file_list)?;
        config.repository.path = paths::expand_tilde(&config.repository.path)?;
        Ok(config)
    }

    /// Save configuration to a file.
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Checks preconditions that must hold before any sweep work starts.
    ///
    /// # Errors
    /// [`ConfigError::MissingRepositoryPath`] when no dispatch destination
    /// is configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repository.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRepositoryPath);
        }
        Ok(())
    }

    /// The caller-supplied comparison policy for this run.
    #[must_use]
    pub const fn policy(&self) -> ComparisonPolicy {
        ComparisonPolicy {
            use_content_hash: self.comparison.use_content_hash,
        }
    }
}

fn default_db_path() -> PathBuf {
    CoreConfig::default().db_path
}

fn default_file_list() -> PathBuf {
    CoreConfig::default().file_list
}

// Matches the historical default of the tool this replaces.
const fn default_use_content_hash() -> bool {
    true
}

const fn default_preserve_structure() -> bool {
    true
}
