//! Monitored-file list input.
//!
//! A plain text file, one path per line, no inline comments. Order is
//! preserved; it has no effect on any individual file's verdict.

use crate::utils::paths;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Reads the monitored-file list.
///
/// Lines are trimmed of trailing newlines; blank lines are skipped. Tilde
/// prefixes expand to the home directory.
///
/// # Errors
/// Returns an error if the list file cannot be read; a run without its
/// input list cannot do anything useful.
pub fn load(list_path: &Path) -> Result<Vec<PathBuf>> {
    let text = std::fs::read_to_string(list_path)
        .with_context(|| format!("Failed to read file list: {}", list_path.display()))?;

    let mut entries = Vec::new();
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        entries.push(paths::expand_tilde(Path::new(line))?);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_preserves_order() -> Result<()> {
        let dir = tempdir()?;
        let list = dir.path().join("file.list");
        std::fs::write(&list, "/etc/b.conf\n/etc/a.conf\nsubdir/c.conf\n")?;

        let entries = load(&list)?;
        assert_eq!(
            entries,
            vec![
                PathBuf::from("/etc/b.conf"),
                PathBuf::from("/etc/a.conf"),
                PathBuf::from("subdir/c.conf"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_load_skips_blank_lines_and_crlf() -> Result<()> {
        let dir = tempdir()?;
        let list = dir.path().join("file.list");
        std::fs::write(&list, "/etc/a.conf\r\n\r\n/etc/b.conf")?;

        let entries = load(&list)?;
        assert_eq!(
            entries,
            vec![PathBuf::from("/etc/a.conf"), PathBuf::from("/etc/b.conf")]
        );
        Ok(())
    }

    #[test]
    fn test_load_expands_tilde() -> Result<()> {
        let dir = tempdir()?;
        let list = dir.path().join("file.list");
        std::fs::write(&list, "~/app.conf\n")?;

        let entries = load(&list)?;
        let home = dirs::home_dir().unwrap();
        assert_eq!(entries, vec![home.join("app.conf")]);
        Ok(())
    }

    #[test]
    fn test_load_missing_list_fails() {
        let dir = tempdir().unwrap();
        assert!(load(&dir.path().join("absent.list")).is_err());
    }
}
