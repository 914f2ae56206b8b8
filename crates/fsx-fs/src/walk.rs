//! Lazy depth-first traversal of a directory subtree.
//!
//! `Walk` is the one traversal primitive in fsx: both the recursive size
//! aggregator and the keyword search consume it. Entries are yielded
//! pre-order (a directory before its contents); sibling order is whatever
//! the filesystem returns. Unreadable directories and erroring entries are
//! skipped so a single permission failure never aborts a walk.

use std::fs;
use std::path::{Path, PathBuf};

/// One entry produced by a [`Walk`].
#[derive(Debug)]
pub struct WalkEntry {
    pub path: PathBuf,
    /// File type as reported by the directory entry (symlinks not followed).
    pub file_type: fs::FileType,
}

/// Iterator over all entries below a root, at every depth.
///
/// The root itself is not yielded. Directory symlinks are not descended
/// into, which keeps cyclic link structures from looping forever.
pub struct Walk {
    stack: Vec<fs::ReadDir>,
}

impl Walk {
    /// Start a walk below `root`. An unreadable root yields an empty walk.
    pub fn new(root: &Path) -> Self {
        let stack = match fs::read_dir(root) {
            Ok(rd) => vec![rd],
            Err(e) => {
                log::debug!("walk: cannot open {}: {e}", root.display());
                Vec::new()
            }
        };
        Self { stack }
    }
}

impl Iterator for Walk {
    type Item = WalkEntry;

    fn next(&mut self) -> Option<WalkEntry> {
        loop {
            let step = self.stack.last_mut()?.next();
            match step {
                Some(Ok(entry)) => {
                    let path = entry.path();
                    let file_type = match entry.file_type() {
                        Ok(ft) => ft,
                        Err(e) => {
                            log::debug!("walk: cannot stat {}: {e}", path.display());
                            continue;
                        }
                    };
                    if file_type.is_dir() {
                        match fs::read_dir(&path) {
                            Ok(rd) => self.stack.push(rd),
                            Err(e) => {
                                log::debug!("walk: cannot open {}: {e}", path.display());
                            }
                        }
                    }
                    return Some(WalkEntry { path, file_type });
                }
                Some(Err(e)) => {
                    log::debug!("walk: unreadable entry: {e}");
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
