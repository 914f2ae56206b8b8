//! Foundation types for the fsx console.
//!
//! This crate holds the error type shared by every fsx crate. It is kept
//! separate so the filesystem layer and the command interpreter can agree on
//! a `Result` alias without depending on each other.

pub mod error;

pub use error::{FsxError, Result};
