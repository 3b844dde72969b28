use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Expands tilde in path to home directory
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    if let Some(path_str) = path.to_str() {
        if path_str.starts_with("~/") || path_str == "~" {
            let home = dirs::home_dir().context("Could not find home directory")?;
            if path_str == "~" {
                Ok(home)
            } else {
                Ok(home.join(&path_str[2..]))
            }
        } else {
            Ok(path.to_path_buf())
        }
    } else {
        Ok(path.to_path_buf())
    }
}

/// Maps a monitored path to its structure-preserving form under a
/// destination root.
///
/// Root markers and drive-letter colons are stripped so the result is always
/// a relative path: `/etc/nginx/nginx.conf` becomes `etc/nginx/nginx.conf`
/// and `C:\app\web.config` becomes `C/app/web.config`. Parent-dir components
/// are dropped so the result cannot escape the root it is joined to.
#[must_use]
pub fn mirror_relative(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                let text = prefix.as_os_str().to_string_lossy().replace(':', "");
                if !text.is_empty() {
                    out.push(text);
                }
            }
            Component::RootDir | Component::CurDir | Component::ParentDir => {}
            Component::Normal(part) => {
                if let Some(drive) = as_drive_letter(part) {
                    out.push(drive);
                } else {
                    out.push(part);
                }
            }
        }
    }
    out
}

/// Recognizes a bare `X:` component (a drive letter seen on a non-Windows
/// host, where the path parser does not treat it as a prefix).
fn as_drive_letter(part: &std::ffi::OsStr) -> Option<String> {
    let text = part.to_str()?;
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(letter), Some(':'), None) if letter.is_ascii_alphabetic() => {
            Some(letter.to_string())
        }
        _ => None,
    }
}
