//! Metadata helpers: timestamp formatting, home directory, emptiness check.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

/// Format a timestamp as local `YYYY-MM-DD HH:MM:SS`.
pub fn format_local_time(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Resolve the user's home directory: `$HOME` when set and non-empty,
/// otherwise the platform user database.
pub fn home_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(PathBuf::from(home));
    }
    #[allow(deprecated)]
    std::env::home_dir()
}

/// Whether `path` is a directory with no entries. Unreadable directories
/// report `false` so they are never treated as confirmed-empty.
pub fn is_dir_empty(path: &Path) -> bool {
    match fs::read_dir(path) {
        Ok(mut rd) => rd.next().is_none(),
        Err(_) => false,
    }
}
