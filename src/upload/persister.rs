//! Batch persistence.
//!
//! Writes decoded records into a resolved namespace, one file per
//! record, overwriting on name collision (last write wins, no
//! versioning). Persistence is deliberately non-transactional: the
//! first failing write aborts the batch and files written before it
//! stay on disk.

use std::fs;
use std::path::Path;

use super::batch::UploadRecord;
use crate::{FiledropError, Result};

/// Persist a batch into a namespace directory.
///
/// Returns the number of files written. On error, some prefix of the
/// batch may already be on disk; callers report the failure rather
/// than roll back.
pub fn persist_batch(namespace: &Path, records: &[UploadRecord]) -> Result<usize> {
    let mut written = 0;

    for record in records {
        if !is_safe_filename(&record.name) {
            return Err(FiledropError::Storage(format!(
                "invalid filename: {:?}",
                record.name
            )));
        }

        let path = namespace.join(&record.name);
        fs::write(&path, &record.bytes).map_err(|e| {
            FiledropError::Storage(format!("failed to save {:?}: {e}", record.name))
        })?;

        tracing::debug!(file = %path.display(), size = record.bytes.len(), "saved upload");
        written += 1;
    }

    Ok(written)
}

/// Filename check: a single path component, no separators or control
/// characters. Broader than the namespace-segment allow-list so that
/// ordinary names with spaces or non-ASCII letters still save.
fn is_safe_filename(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    !name
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(name: &str, bytes: &[u8]) -> UploadRecord {
        UploadRecord {
            name: name.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_persist_writes_all_records() {
        let dir = TempDir::new().unwrap();

        let written = persist_batch(
            dir.path(),
            &[record("a.txt", b"hi"), record("b.txt", b"there")],
        )
        .unwrap();

        assert_eq!(written, 2);
        assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"hi");
        assert_eq!(fs::read(dir.path().join("b.txt")).unwrap(), b"there");
    }

    #[test]
    fn test_persist_empty_batch() {
        let dir = TempDir::new().unwrap();

        let written = persist_batch(dir.path(), &[]).unwrap();

        assert_eq!(written, 0);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_persist_overwrites_on_collision() {
        let dir = TempDir::new().unwrap();

        persist_batch(dir.path(), &[record("a.txt", b"first")]).unwrap();
        persist_batch(dir.path(), &[record("a.txt", b"second")]).unwrap();

        assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"second");
    }

    #[test]
    fn test_persist_rejects_traversal_name() {
        let dir = TempDir::new().unwrap();

        let result = persist_batch(dir.path(), &[record("../escape.txt", b"x")]);

        assert!(matches!(result, Err(FiledropError::Storage(_))));
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[test]
    fn test_persist_partial_failure_keeps_earlier_files() {
        let dir = TempDir::new().unwrap();

        let result = persist_batch(
            dir.path(),
            &[record("kept.txt", b"ok"), record("bad/name", b"x")],
        );

        assert!(result.is_err());
        // The record written before the failure stays on disk.
        assert_eq!(fs::read(dir.path().join("kept.txt")).unwrap(), b"ok");
    }

    #[test]
    fn test_persist_allows_spaces_and_unicode() {
        let dir = TempDir::new().unwrap();

        let written = persist_batch(
            dir.path(),
            &[record("my notes.txt", b"a"), record("資料.pdf", b"b")],
        )
        .unwrap();

        assert_eq!(written, 2);
        assert!(dir.path().join("my notes.txt").exists());
        assert!(dir.path().join("資料.pdf").exists());
    }

    #[test]
    fn test_is_safe_filename() {
        assert!(is_safe_filename("report.pdf"));
        assert!(is_safe_filename("my notes.txt"));
        assert!(is_safe_filename(".hidden"));

        assert!(!is_safe_filename(""));
        assert!(!is_safe_filename("."));
        assert!(!is_safe_filename(".."));
        assert!(!is_safe_filename("a/b.txt"));
        assert!(!is_safe_filename("a\\b.txt"));
        assert!(!is_safe_filename("line\nbreak"));
    }
}
