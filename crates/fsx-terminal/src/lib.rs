//! Command interpreter for the fsx console.
//!
//! The interpreter is a registry-based dispatch system. Commands implement
//! the `Command` trait and are registered by name. The interpreter tokenizes
//! input lines (with quoting and escaping), resolves the command name, and
//! dispatches `execute()` against the session environment.

mod commands;
mod file_commands;
mod interpreter;

/// Register all built-in commands into a registry.
pub use commands::register_builtins;
/// Register the filesystem commands into a registry.
pub use file_commands::register_file_commands;
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (text, table, signals).
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Session state passed to every command.
pub use interpreter::Environment;
/// Blocking yes/no confirmation source for destructive commands.
pub use interpreter::Prompter;
pub use interpreter::{Align, format_table, resolve_path, tokenize};
