// Memoria - platform/fs.rs
//
// Filesystem helpers shared by the loaders.

use std::io;
use std::path::Path;

/// Outcome of a size-checked read.
#[derive(Debug)]
pub enum CappedRead {
    /// Full file content (invalid UTF-8 replaced).
    Content(String),

    /// The file is larger than the cap; nothing was read.
    TooLarge { size: u64 },
}

/// Read the full content of a file as a string, refusing files above
/// `max_size` bytes.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_capped(path: &Path, max_size: u64) -> io::Result<CappedRead> {
    let size = std::fs::metadata(path)?.len();
    if size > max_size {
        tracing::warn!(
            path = %path.display(),
            size,
            max_size,
            "File exceeds size limit; not reading"
        );
        return Ok(CappedRead::TooLarge { size });
    }
    read_file_lossy(path).map(CappedRead::Content)
}

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write `bytes` to `path` atomically (write temp, then rename).
///
/// Creates parent directories as needed. A crash between write and rename
/// leaves the previous file intact.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path).map_err(|e| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_capped_within_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("m.json");
        std::fs::write(&path, b"[]").unwrap();
        match read_capped(&path, 16).unwrap() {
            CappedRead::Content(text) => assert_eq!(text, "[]"),
            other => panic!("expected content, got {other:?}"),
        }
    }

    #[test]
    fn test_read_capped_too_large() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("m.json");
        std::fs::write(&path, vec![b' '; 32]).unwrap();
        assert!(matches!(
            read_capped(&path, 16).unwrap(),
            CappedRead::TooLarge { size: 32 }
        ));
    }

    #[test]
    fn test_read_capped_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_capped(&dir.path().join("nope.json"), 16).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_lossy_read_replaces_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, [b'"', 0xFF, b'"']).unwrap();
        assert_eq!(read_file_lossy(&path).unwrap(), "\"\u{FFFD}\"");
    }

    #[test]
    fn test_write_atomic_creates_parents_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.json");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert!(!path.with_extension("tmp").exists());
    }
}
