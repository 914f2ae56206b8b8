//! Recursive size aggregation and the rounded KB/MB report format.

use std::fs;
use std::path::Path;

use crate::walk::Walk;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Total byte size of every regular file below `root`, at all depths.
///
/// Directories, symlinks to non-files, and unreadable entries contribute
/// zero. Never fails; an unreadable root simply totals zero.
pub fn subtree_file_size(root: &Path) -> u64 {
    Walk::new(root)
        .map(|entry| {
            fs::metadata(&entry.path)
                .ok()
                .filter(|m| m.is_file())
                .map_or(0, |m| m.len())
        })
        .sum()
}

/// Format a byte total as whole megabytes when it reaches 1 MiB, otherwise
/// whole kilobytes. Both round half up (half a unit is added before the
/// integer division).
pub fn format_rounded_size(bytes: u64) -> String {
    if bytes >= MIB {
        format!("{} MB", (bytes + MIB / 2) / MIB)
    } else {
        format!("{} KB", (bytes + KIB / 2) / KIB)
    }
}
