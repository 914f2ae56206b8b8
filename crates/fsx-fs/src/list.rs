//! Directory listing with optional size/time ordering.
//!
//! A listing reads the immediate children of one directory and attaches the
//! metadata the caller will display. The expensive part, recursive directory
//! sizes, is computed only in size-sort mode; in every other mode a
//! directory's size is reported as unknown.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use fsx_types::Result;

use crate::meta::is_dir_empty;
use crate::size::subtree_file_size;
use crate::EntryKind;

/// Ordering applied to a directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Enumeration order, no metadata beyond the cheap stat.
    Plain,
    /// Descending by total byte size; empty directories last.
    SortBySize,
    /// Descending by modification time.
    SortByTime,
}

/// One row of a directory listing. Rebuilt fresh on every call; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// Base name only, with a trailing `/` for directories.
    pub name: String,
    pub kind: EntryKind,
    /// `None` means unknown: unreadable files, and directories outside
    /// size-sort mode.
    pub size_bytes: Option<u64>,
    pub modified: Option<SystemTime>,
    /// Only ever set for directories in size-sort mode.
    pub empty_dir: bool,
}

/// List the immediate children of `dir`.
///
/// A child that cannot be read is skipped rather than failing the listing;
/// only an unopenable `dir` itself is an error.
pub fn list_directory(dir: &Path, mode: ListMode) -> Result<Vec<DirEntryInfo>> {
    let mut items = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::debug!("list: unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        let is_dir = path.is_dir();

        let mut name = entry.file_name().to_string_lossy().into_owned();
        if is_dir {
            name.push('/');
        }

        let (size_bytes, empty_dir) = if mode == ListMode::SortBySize && is_dir {
            (Some(subtree_file_size(&path)), is_dir_empty(&path))
        } else if is_dir {
            (None, false)
        } else {
            let size = fs::metadata(&path)
                .ok()
                .filter(|m| m.is_file())
                .map(|m| m.len());
            (size, false)
        };

        let modified = fs::metadata(&path).ok().and_then(|m| m.modified().ok());

        items.push(DirEntryInfo {
            name,
            kind: if is_dir { EntryKind::Dir } else { EntryKind::File },
            size_bytes,
            modified,
            empty_dir,
        });
    }

    sort_entries(&mut items, mode);
    Ok(items)
}

/// Apply the ordering for `mode`. Plain mode leaves enumeration order.
pub fn sort_entries(items: &mut [DirEntryInfo], mode: ListMode) {
    match mode {
        ListMode::Plain => {}
        ListMode::SortByTime => {
            // Unknown mtimes sort as the epoch, i.e. oldest.
            items.sort_by(|a, b| {
                let at = a.modified.unwrap_or(UNIX_EPOCH);
                let bt = b.modified.unwrap_or(UNIX_EPOCH);
                bt.cmp(&at).then_with(|| a.name.cmp(&b.name))
            });
        }
        ListMode::SortBySize => {
            // Empty directories always trail, regardless of their zero size.
            items.sort_by(|a, b| {
                a.empty_dir
                    .cmp(&b.empty_dir)
                    .then_with(|| {
                        b.size_bytes
                            .unwrap_or(0)
                            .cmp(&a.size_bytes.unwrap_or(0))
                    })
                    .then_with(|| a.name.cmp(&b.name))
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn entry(name: &str, kind: EntryKind) -> DirEntryInfo {
        DirEntryInfo {
            name: name.to_string(),
            kind,
            size_bytes: None,
            modified: None,
            empty_dir: false,
        }
    }

    #[test]
    fn size_sort_puts_empty_directories_last() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("f"), vec![0u8; 100]).unwrap();
        fs::create_dir(tmp.path().join("D")).unwrap();
        fs::write(tmp.path().join("D/inner"), vec![0u8; 50]).unwrap();
        fs::create_dir(tmp.path().join("E")).unwrap();

        let items = list_directory(tmp.path(), ListMode::SortBySize).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["f", "D/", "E/"]);
        assert_eq!(items[0].size_bytes, Some(100));
        assert_eq!(items[1].size_bytes, Some(50));
        assert!(items[2].empty_dir);
    }

    #[test]
    fn plain_mode_never_computes_directory_sizes() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("d")).unwrap();
        fs::write(tmp.path().join("d/big"), vec![0u8; 4096]).unwrap();
        fs::write(tmp.path().join("a.txt"), vec![0u8; 7]).unwrap();

        let items = list_directory(tmp.path(), ListMode::Plain).unwrap();
        let dir = items.iter().find(|i| i.name == "d/").unwrap();
        assert_eq!(dir.size_bytes, None);
        let file = items.iter().find(|i| i.name == "a.txt").unwrap();
        assert_eq!(file.size_bytes, Some(7));
    }

    #[test]
    fn names_carry_trailing_slash_only_for_directories() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("plain"), b"").unwrap();

        let items = list_directory(tmp.path(), ListMode::Plain).unwrap();
        let mut names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["plain", "sub/"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(list_directory(&tmp.path().join("gone"), ListMode::Plain).is_err());
    }

    #[test]
    fn time_sort_descends_with_name_tiebreak() {
        let base = UNIX_EPOCH + Duration::from_secs(1_000_000);
        let mut items = vec![
            DirEntryInfo {
                modified: Some(base),
                ..entry("old", EntryKind::File)
            },
            DirEntryInfo {
                modified: Some(base + Duration::from_secs(60)),
                ..entry("new", EntryKind::File)
            },
            DirEntryInfo {
                modified: Some(base),
                ..entry("also-old", EntryKind::File)
            },
            DirEntryInfo {
                modified: None,
                ..entry("unknown", EntryKind::File)
            },
        ];
        sort_entries(&mut items, ListMode::SortByTime);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["new", "also-old", "old", "unknown"]);
    }

    #[test]
    fn size_sort_tiebreak_is_ascending_name() {
        let mut items = vec![
            DirEntryInfo {
                size_bytes: Some(10),
                ..entry("b", EntryKind::File)
            },
            DirEntryInfo {
                size_bytes: Some(10),
                ..entry("a", EntryKind::File)
            },
        ];
        sort_entries(&mut items, ListMode::SortBySize);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn repeated_listing_is_identical() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("x"), vec![0u8; 3]).unwrap();
        fs::create_dir(tmp.path().join("y")).unwrap();

        let first = list_directory(tmp.path(), ListMode::SortBySize).unwrap();
        let second = list_directory(tmp.path(), ListMode::SortBySize).unwrap();
        assert_eq!(first, second);
    }
}
