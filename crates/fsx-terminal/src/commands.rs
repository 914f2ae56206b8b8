//! Session commands for the fsx console: exit and cd.

use std::fs;

use fsx_fs::home_dir;
use fsx_types::{FsxError, Result};

use crate::file_commands::register_file_commands;
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment, resolve_path};

/// Register all built-in commands into a registry.
///
/// `help` is handled by the registry itself since it needs the command list.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(ExitCmd));
    reg.register(Box::new(CdCmd));
    register_file_commands(reg);
}

// ---------------------------------------------------------------------------
// exit
// ---------------------------------------------------------------------------

struct ExitCmd;
impl Command for ExitCmd {
    fn name(&self) -> &str {
        "exit"
    }
    fn description(&self) -> &str {
        "Exit the program"
    }
    fn usage(&self) -> &str {
        "exit"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Exit)
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Switch to target directory ('cd ~' for home)"
    }
    fn usage(&self) -> &str {
        "cd [path]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(arg) = args.first() else {
            return Err(FsxError::Command(
                "Missing path: Please enter 'cd [path]'".to_string(),
            ));
        };

        let target = if *arg == "~" {
            home_dir().ok_or_else(|| FsxError::Command(format!("Invalid directory: {arg}")))?
        } else {
            resolve_path(&env.cwd, arg)
        };

        let meta = fs::metadata(&target)
            .map_err(|_| FsxError::Command(format!("Invalid directory: {arg}")))?;
        if !meta.is_dir() {
            return Err(FsxError::Command(format!("Not a directory: {arg}")));
        }

        // Canonicalize so `cd ..` keeps the session cwd in normal form.
        env.cwd = fs::canonicalize(&target)
            .map_err(|_| FsxError::Command(format!("Invalid directory: {arg}")))?;
        log::debug!("cwd is now {}", env.cwd.display());
        Ok(CommandOutput::None)
    }
}
