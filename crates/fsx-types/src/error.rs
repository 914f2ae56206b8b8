//! Error types for fsx.

use std::io;

/// Errors produced by the fsx console.
///
/// `Parse` rejects a whole input line (unmatched quote, dangling escape).
/// `Command` covers every per-command failure that is reported to the user
/// and then forgotten: missing targets, wrong entry type, bad options,
/// unknown command names. `Io` wraps the single filesystem call a command
/// performs. None of these terminate the read-eval-print loop.
#[derive(Debug, thiserror::Error)]
pub enum FsxError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FsxError>;
