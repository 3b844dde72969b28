use memmap2::MmapOptions;
use std::fs::File;
use std::io;
use std::path::Path;
use xxhash_rust::xxh3::xxh3_128;

/// Files at or above this size are memory-mapped instead of read into memory.
const MMAP_THRESHOLD: u64 = 1_048_576;

/// Computes the XXH3 128-bit digest of raw bytes as a 32-char hex string.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> String {
    let hash = xxh3_128(data);
    format!("{hash:032x}")
}

/// Computes the content digest of a file.
///
/// Hashing operates on raw bytes, never on decoded text, so binary and
/// non-UTF8 configuration files produce stable digests.
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();

    if len == 0 {
        return Ok(hash_bytes(b""));
    }

    if len < MMAP_THRESHOLD {
        let content = std::fs::read(path)?;
        Ok(hash_bytes(&content))
    } else {
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(hash_bytes(&mmap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_hash_bytes_stable() {
        let data = b"max_connections = 100";
        let hash1 = hash_bytes(data);
        let hash2 = hash_bytes(data);
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 32);

        let hash3 = hash_bytes(b"max_connections = 200");
        assert_ne!(hash1, hash3);
    }

    #[test]
    fn test_hash_file_matches_bytes() -> io::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("app.conf");
        let content = b"listen = 0.0.0.0:8080\n";
        std::fs::write(&file_path, content)?;

        assert_eq!(hash_file(&file_path)?, hash_bytes(content));
        Ok(())
    }

    #[test]
    fn test_hash_file_non_utf8() -> io::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("binary.conf");
        let content = [0x00u8, 0xFF, 0xFE, 0x80, 0x81];
        std::fs::write(&file_path, content)?;

        let hash = hash_file(&file_path)?;
        assert_eq!(hash.len(), 32);
        assert_eq!(hash, hash_bytes(&content));
        Ok(())
    }

    #[test]
    fn test_hash_empty_file() -> io::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("empty.conf");
        std::fs::write(&file_path, b"")?;

        assert_eq!(hash_file(&file_path)?, hash_bytes(b""));
        Ok(())
    }

    #[test]
    fn test_hash_missing_file() {
        assert!(hash_file(Path::new("/nonexistent/app.conf")).is_err());
    }
}
