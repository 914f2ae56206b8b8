//! Recursive keyword search over entry base names.

use std::path::{Path, PathBuf};

use crate::EntryKind;
use crate::walk::Walk;

/// One search hit: the absolute path and how to label it.
#[derive(Debug)]
pub struct SearchMatch {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Find every entry below `root` whose base name contains `keyword`,
/// case-insensitively. The match is against the base name only, never a
/// parent path component, and the root itself is not considered. Results
/// keep traversal order. An empty result is not an error.
pub fn search_by_keyword(root: &Path, keyword: &str) -> Vec<SearchMatch> {
    let needle = keyword.to_lowercase();
    Walk::new(root)
        .filter_map(|entry| {
            let name = entry.path.file_name()?.to_string_lossy().to_lowercase();
            if !name.contains(&needle) {
                return None;
            }
            let kind = if entry.path.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            Some(SearchMatch {
                path: entry.path,
                kind,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn match_is_case_insensitive_substring() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("Logfile.txt"), b"").unwrap();
        fs::create_dir(tmp.path().join("catalogue")).unwrap();
        fs::write(tmp.path().join("other.rs"), b"").unwrap();

        let mut names: Vec<String> = search_by_keyword(tmp.path(), "log")
            .iter()
            .map(|m| m.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["Logfile.txt", "catalogue"]);
    }

    #[test]
    fn matches_base_name_not_parent_components() {
        let tmp = tempfile::tempdir().unwrap();
        // "loganne" matches as its own base name; the file below it does not.
        fs::create_dir(tmp.path().join("loganne")).unwrap();
        fs::write(tmp.path().join("loganne/x"), b"").unwrap();

        let results = search_by_keyword(tmp.path(), "log");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, EntryKind::Dir);
        assert_eq!(results[0].path.file_name().unwrap(), "loganne");
    }

    #[test]
    fn finds_entries_at_depth() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("a/b/c")).unwrap();
        fs::write(tmp.path().join("a/b/c/needle.dat"), b"").unwrap();

        let results = search_by_keyword(tmp.path(), "NEEDLE");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, EntryKind::File);
    }

    #[test]
    fn no_match_returns_empty() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), b"").unwrap();
        assert!(search_by_keyword(tmp.path(), "zzz").is_empty());
    }
}
