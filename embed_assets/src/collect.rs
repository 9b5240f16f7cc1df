//! Source collection: glob patterns to in-memory file records.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::error::{Error, Result};

/// One collected input file.
///
/// `path` is the match exactly as the filesystem reported it, not
/// normalized; it becomes the lookup key in the generated artifact.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: String,
    pub bytes: Vec<u8>,
    /// Modification time at collection, when the platform reports one.
    pub mod_time: Option<SystemTime>,
}

/// Resolves `patterns` in order and reads every match into memory.
///
/// Records accumulate in pattern-list order, then within one pattern in the
/// resolver's alphabetical match order, so the result does not depend on
/// filesystem enumeration order. A pattern matching nothing contributes zero
/// records; whether that leaves the bundle empty is the caller's call.
/// Duplicate matches are kept as-is.
///
/// # Errors
///
/// Returns [`Error::Pattern`] for a syntactically invalid pattern and
/// [`Error::Read`] when a match cannot be read in full (unreadable, or
/// vanished between match and read).
pub fn collect(patterns: &[String]) -> Result<Vec<FileRecord>> {
    let mut records = Vec::new();
    for pattern in patterns {
        let matches = glob::glob(pattern).map_err(|source| Error::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        let before = records.len();
        for entry in matches {
            let path = entry.map_err(|err| Error::Read {
                path: err.path().display().to_string(),
                source: err.into_error(),
            })?;
            records.push(read_file(&path)?);
        }
        log::debug!("pattern {:?} matched {} files", pattern, records.len() - before);
    }
    Ok(records)
}

fn read_file(path: &Path) -> Result<FileRecord> {
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.display().to_string(),
        source,
    })?;
    let mod_time = fs::metadata(path).and_then(|meta| meta.modified()).ok();
    Ok(FileRecord {
        path: path.to_string_lossy().into_owned(),
        bytes,
        mod_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), b"beta").unwrap();
        fs::write(dir.path().join("a.txt"), b"alpha").unwrap();
        fs::write(dir.path().join("c.bin"), [0u8, 159, 146, 150]).unwrap();
        dir
    }

    fn pattern(dir: &tempfile::TempDir, tail: &str) -> String {
        dir.path().join(tail).to_string_lossy().into_owned()
    }

    #[test]
    fn accumulates_in_pattern_then_match_order() {
        let dir = fixture_dir();
        let records = collect(&[pattern(&dir, "*.bin"), pattern(&dir, "*.txt")]).unwrap();

        let names: Vec<&str> = records
            .iter()
            .map(|r| Path::new(&r.path).file_name().unwrap().to_str().unwrap())
            .collect();
        // *.bin first (pattern order), then *.txt alphabetically (match order).
        assert_eq!(names, ["c.bin", "a.txt", "b.txt"]);
        assert_eq!(records[1].bytes, b"alpha");
        assert!(records[0].mod_time.is_some());
    }

    #[test]
    fn pattern_without_matches_contributes_no_records() {
        let dir = fixture_dir();
        let records = collect(&[pattern(&dir, "*.missing"), pattern(&dir, "a.txt")]).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn duplicate_matches_are_kept() {
        let dir = fixture_dir();
        let records = collect(&[pattern(&dir, "a.txt"), pattern(&dir, "a.*")]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path, records[1].path);
    }

    #[test]
    fn invalid_pattern_is_reported_as_such() {
        let err = collect(&["fixtures/[".to_owned()]).unwrap_err();
        assert!(matches!(err, Error::Pattern { ref pattern, .. } if pattern == "fixtures/["));
    }

    #[test]
    fn unreadable_match_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();
        // The pattern matches the directory itself, which cannot be read as a file.
        let err = collect(&[pattern(&dir, "sub*")]).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn empty_file_is_collected_with_zero_bytes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("empty"), b"").unwrap();
        let records = collect(&[pattern(&dir, "empty")]).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].bytes.is_empty());
    }
}
