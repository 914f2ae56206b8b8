//! Real-filesystem layer for the fsx console.
//!
//! Everything here is stateless: each call reads the live filesystem and
//! returns owned values. Recursive operations (size aggregation, search) are
//! consumers of the single lazy traversal in [`walk`]; per-entry failures
//! during a walk are skipped, never propagated.

pub mod list;
pub mod meta;
pub mod search;
pub mod size;
pub mod walk;

pub use list::{DirEntryInfo, ListMode, list_directory};
pub use meta::{format_local_time, home_dir, is_dir_empty};
pub use search::{SearchMatch, search_by_keyword};
pub use size::{format_rounded_size, subtree_file_size};
pub use walk::Walk;

/// Kind of a filesystem entry, as displayed to the user.
///
/// Anything that is not a directory (regular files, sockets, devices,
/// dangling symlinks) is shown as `File`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

impl EntryKind {
    /// Display label: `Dir` or `File`.
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Dir => "Dir",
            EntryKind::File => "File",
        }
    }
}
