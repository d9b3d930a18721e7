//! Exact-duplicate file detection.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::language::is_code_file;

use super::{DuplicateKind, DuplicatePair};

/// Find files with byte-identical content under `root`.
///
/// Only files with a recognized source extension are fingerprinted.
/// Enumeration is sorted by file name at each directory level, so the
/// "first seen" file — the one reported as the original in every pair —
/// is deterministic across platforms. Three identical files A, B, C
/// yield (A,B) and (A,C), never (B,C). Unreadable or non-UTF-8 files are
/// skipped silently; the scan never fails as a whole.
pub fn find_duplicates<P: AsRef<Path>>(root: P) -> Vec<DuplicatePair> {
    let mut first_seen: HashMap<String, PathBuf> = HashMap::new();
    let mut pairs = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_code_file(path) {
            continue;
        }
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => continue,
        };

        let fingerprint = content_fingerprint(&content);
        match first_seen.entry(fingerprint) {
            Entry::Occupied(original) => pairs.push(DuplicatePair {
                original: original.get().to_string_lossy().to_string(),
                duplicate: path.to_string_lossy().to_string(),
                relation: DuplicateKind::ExactDuplicate,
            }),
            Entry::Vacant(slot) => {
                slot.insert(path.to_path_buf());
            }
        }
    }

    pairs
}

/// SHA-256 over the file text. Exact-content identity, not similarity.
fn content_fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_identical_files_reported_once() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.py"), "VALUE = 42\n").unwrap();
        std::fs::write(temp.path().join("b.py"), "VALUE = 42\n").unwrap();

        let pairs = find_duplicates(temp.path());
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].original.ends_with("a.py"));
        assert!(pairs[0].duplicate.ends_with("b.py"));
        assert_eq!(pairs[0].relation, DuplicateKind::ExactDuplicate);
    }

    #[test]
    fn test_first_seen_is_always_the_original() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.py"), "same\n").unwrap();
        std::fs::write(temp.path().join("b.py"), "same\n").unwrap();
        std::fs::write(temp.path().join("c.py"), "same\n").unwrap();

        let pairs = find_duplicates(temp.path());
        assert_eq!(pairs.len(), 2);
        // (a,b) and (a,c) -- never (b,c).
        assert!(pairs.iter().all(|p| p.original.ends_with("a.py")));
        assert!(pairs.iter().any(|p| p.duplicate.ends_with("b.py")));
        assert!(pairs.iter().any(|p| p.duplicate.ends_with("c.py")));
    }

    #[test]
    fn test_different_content_not_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.py"), "x = 1\n").unwrap();
        std::fs::write(temp.path().join("b.py"), "x = 2\n").unwrap();

        assert!(find_duplicates(temp.path()).is_empty());
    }

    #[test]
    fn test_unrecognized_extensions_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.txt"), "same\n").unwrap();
        std::fs::write(temp.path().join("b.txt"), "same\n").unwrap();

        assert!(find_duplicates(temp.path()).is_empty());
    }

    #[test]
    fn test_unreadable_file_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.py"), "fine\n").unwrap();
        // Invalid UTF-8: skipped, not an error and not a duplicate.
        std::fs::write(temp.path().join("b.py"), [0xff, 0xfe, 0x9c]).unwrap();

        assert!(find_duplicates(temp.path()).is_empty());
    }

    #[test]
    fn test_recursive_walk() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("nested")).unwrap();
        std::fs::write(temp.path().join("a.py"), "dup\n").unwrap();
        std::fs::write(temp.path().join("nested/b.py"), "dup\n").unwrap();

        let pairs = find_duplicates(temp.path());
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].duplicate.contains("nested"));
    }
}
