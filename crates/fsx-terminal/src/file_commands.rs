//! Filesystem commands: ls, touch, mkdir, rm, rmdir, stat, search, cp, mv, du.
//!
//! Each command is a short chain of existence/type checks followed by a
//! single filesystem call. Failures are reported and forgotten; nothing here
//! ends the session. `rm` and an overwriting `cp` block on the environment's
//! confirmation prompter first.

use std::fs;
use std::path::{Path, PathBuf};

use fsx_fs::{
    EntryKind, ListMode, format_local_time, format_rounded_size, is_dir_empty, list_directory,
    search_by_keyword, subtree_file_size,
};
use fsx_types::{FsxError, Result};

use crate::interpreter::{Align, Command, CommandOutput, CommandRegistry, Environment, resolve_path};

/// Register the filesystem commands into a registry.
pub fn register_file_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(LsCmd));
    reg.register(Box::new(TouchCmd));
    reg.register(Box::new(MkdirCmd));
    reg.register(Box::new(RmCmd));
    reg.register(Box::new(RmdirCmd));
    reg.register(Box::new(StatCmd));
    reg.register(Box::new(SearchCmd));
    reg.register(Box::new(CpCmd));
    reg.register(Box::new(MvCmd));
    reg.register(Box::new(DuCmd));
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List directory contents (-s: by size desc, -t: by modify time desc)"
    }
    fn usage(&self) -> &str {
        "ls [-s|-t]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mode = match args {
            [] => ListMode::Plain,
            ["-s"] => ListMode::SortBySize,
            ["-t"] => ListMode::SortByTime,
            _ => return Err(FsxError::Command("Invalid option: ls".to_string())),
        };

        let entries = list_directory(&env.cwd, mode)
            .map_err(|_| FsxError::Command("Failed to access current directory".to_string()))?;

        let rows = entries
            .iter()
            .map(|e| {
                vec![
                    e.name.clone(),
                    e.kind.label().to_string(),
                    e.size_bytes.map_or_else(|| "-".to_string(), |s| s.to_string()),
                    e.modified.map_or_else(|| "-".to_string(), format_local_time),
                ]
            })
            .collect();

        Ok(CommandOutput::Table {
            headers: vec![
                "Name".to_string(),
                "Type".to_string(),
                "Size(B)".to_string(),
                "Modify Time".to_string(),
            ],
            align: vec![Align::Left, Align::Left, Align::Right, Align::Left],
            rows,
        })
    }
}

// ---------------------------------------------------------------------------
// touch
// ---------------------------------------------------------------------------

struct TouchCmd;
impl Command for TouchCmd {
    fn name(&self) -> &str {
        "touch"
    }
    fn description(&self) -> &str {
        "Create an empty file"
    }
    fn usage(&self) -> &str {
        "touch [name]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(name) = args.first() else {
            return Err(FsxError::Command(
                "Missing filename: Please enter 'touch [name]'".to_string(),
            ));
        };
        let path = resolve_path(&env.cwd, name);
        if path.exists() {
            return Err(FsxError::Command(format!("File already exists: {name}")));
        }
        fs::File::create(&path)
            .map_err(|_| FsxError::Command(format!("Failed to create file: {name}")))?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// mkdir
// ---------------------------------------------------------------------------

struct MkdirCmd;
impl Command for MkdirCmd {
    fn name(&self) -> &str {
        "mkdir"
    }
    fn description(&self) -> &str {
        "Create an empty directory"
    }
    fn usage(&self) -> &str {
        "mkdir [name]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(name) = args.first() else {
            return Err(FsxError::Command(
                "Missing directory name: Please enter 'mkdir [name]'".to_string(),
            ));
        };
        let path = resolve_path(&env.cwd, name);
        if path.exists() {
            return Err(FsxError::Command(format!(
                "Directory already exists: {name}"
            )));
        }
        fs::create_dir(&path)
            .map_err(|_| FsxError::Command(format!("Failed to create directory: {name}")))?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// rm
// ---------------------------------------------------------------------------

struct RmCmd;
impl Command for RmCmd {
    fn name(&self) -> &str {
        "rm"
    }
    fn description(&self) -> &str {
        "Delete a file (with confirmation)"
    }
    fn usage(&self) -> &str {
        "rm [name]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(name) = args.first() else {
            return Err(FsxError::Command(
                "Missing filename: Please enter 'rm [name]'".to_string(),
            ));
        };
        let path = resolve_path(&env.cwd, name);
        let meta = fs::metadata(&path)
            .map_err(|_| FsxError::Command(format!("File not found: {name}")))?;
        if !meta.is_file() {
            return Err(FsxError::Command(format!("Not a file: {name}")));
        }

        let prompt = format!("Are you sure to delete {name}? (y/n) ");
        if !env.prompter.confirm(&prompt) {
            return Ok(CommandOutput::None);
        }

        fs::remove_file(&path)
            .map_err(|_| FsxError::Command(format!("Failed to delete file: {name}")))?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// rmdir
// ---------------------------------------------------------------------------

struct RmdirCmd;
impl Command for RmdirCmd {
    fn name(&self) -> &str {
        "rmdir"
    }
    fn description(&self) -> &str {
        "Delete an empty directory"
    }
    fn usage(&self) -> &str {
        "rmdir [name]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(name) = args.first() else {
            return Err(FsxError::Command(
                "Missing directory name: Please enter 'rmdir [name]'".to_string(),
            ));
        };
        let path = resolve_path(&env.cwd, name);
        let meta = fs::metadata(&path)
            .map_err(|_| FsxError::Command(format!("Directory not found: {name}")))?;
        if !meta.is_dir() {
            return Err(FsxError::Command(format!("Not a directory: {name}")));
        }
        if !is_dir_empty(&path) {
            return Err(FsxError::Command(format!("Directory not empty: {name}")));
        }
        fs::remove_dir(&path)
            .map_err(|_| FsxError::Command(format!("Failed to delete directory: {name}")))?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// stat
// ---------------------------------------------------------------------------

struct StatCmd;
impl Command for StatCmd {
    fn name(&self) -> &str {
        "stat"
    }
    fn description(&self) -> &str {
        "Show detailed information"
    }
    fn usage(&self) -> &str {
        "stat [name]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(name) = args.first() else {
            return Err(FsxError::Command(
                "Missing target: Please enter 'stat [name]'".to_string(),
            ));
        };
        let path = resolve_path(&env.cwd, name);
        let meta = fs::metadata(&path)
            .map_err(|_| FsxError::Command(format!("Target not found: {name}")))?;
        let is_dir = meta.is_dir();

        let fmt_or_dash =
            |t: std::io::Result<std::time::SystemTime>| t.map_or_else(|_| "-".to_string(), format_local_time);

        let lines = vec![
            format!("Type: {}", if is_dir { "Dir" } else { "File" }),
            format!("Path: {}", path.display()),
            format!(
                "Size: {}",
                if is_dir {
                    "-".to_string()
                } else {
                    meta.len().to_string()
                }
            ),
            format!("Create Time: {}", fmt_or_dash(meta.created())),
            format!("Modify Time: {}", fmt_or_dash(meta.modified())),
            format!("Access Time: {}", fmt_or_dash(meta.accessed())),
        ];
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

struct SearchCmd;
impl Command for SearchCmd {
    fn name(&self) -> &str {
        "search"
    }
    fn description(&self) -> &str {
        "Search files and directories recursively"
    }
    fn usage(&self) -> &str {
        "search [keyword]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(keyword) = args.first() else {
            return Err(FsxError::Command(
                "Missing keyword: Please enter 'search [keyword]'".to_string(),
            ));
        };
        if !env.cwd.is_dir() {
            return Err(FsxError::Command(
                "Failed to access current directory".to_string(),
            ));
        }

        let results = search_by_keyword(&env.cwd, keyword);
        if results.is_empty() {
            return Ok(CommandOutput::Text(format!(
                "No results found for '{keyword}'"
            )));
        }

        let mut out = format!("Search results for '{keyword}' ({} items):", results.len());
        for m in &results {
            let suffix = if m.kind == EntryKind::Dir { "/" } else { "" };
            out.push_str(&format!(
                "\n{}{suffix} ({})",
                m.path.display(),
                m.kind.label()
            ));
        }
        Ok(CommandOutput::Text(out))
    }
}

// ---------------------------------------------------------------------------
// cp
// ---------------------------------------------------------------------------

/// Resolve the final destination: copying or moving into an existing
/// directory targets `<dir>/<source base name>`.
fn resolve_destination(src: &Path, dst_arg: &Path) -> Result<PathBuf> {
    if dst_arg.is_dir() {
        let base = src
            .file_name()
            .ok_or_else(|| FsxError::Command("Invalid target path".to_string()))?;
        Ok(dst_arg.join(base))
    } else {
        Ok(dst_arg.to_path_buf())
    }
}

/// The destination's parent must be an existing directory.
fn check_destination_parent(dst: &Path) -> Result<()> {
    let parent = match dst.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !parent.is_dir() {
        return Err(FsxError::Command("Invalid target path".to_string()));
    }
    Ok(())
}

struct CpCmd;
impl Command for CpCmd {
    fn name(&self) -> &str {
        "cp"
    }
    fn description(&self) -> &str {
        "Copy a file (with confirmation on overwrite)"
    }
    fn usage(&self) -> &str {
        "cp [src] [dst]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let &[src_arg, dst_arg] = args else {
            return Err(FsxError::Command("Invalid target path".to_string()));
        };
        let src = resolve_path(&env.cwd, src_arg);
        let dst = resolve_path(&env.cwd, dst_arg);

        let src_ok = fs::metadata(&src).map(|m| m.is_file()).unwrap_or(false);
        if !src_ok {
            return Err(FsxError::Command("Source not found".to_string()));
        }

        let dst_file = resolve_destination(&src, &dst)?;
        check_destination_parent(&dst_file)?;
        if dst_file.is_dir() {
            return Err(FsxError::Command("Invalid target path".to_string()));
        }

        if dst_file.exists()
            && !env
                .prompter
                .confirm("File exists in target: Overwrite? (y/n) ")
        {
            return Ok(CommandOutput::None);
        }

        fs::copy(&src, &dst_file)
            .map_err(|_| FsxError::Command("Invalid target path".to_string()))?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// mv
// ---------------------------------------------------------------------------

struct MvCmd;
impl Command for MvCmd {
    fn name(&self) -> &str {
        "mv"
    }
    fn description(&self) -> &str {
        "Move/rename a file or directory"
    }
    fn usage(&self) -> &str {
        "mv [src] [dst]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let &[src_arg, dst_arg] = args else {
            return Err(FsxError::Command("Invalid target path".to_string()));
        };
        let src = resolve_path(&env.cwd, src_arg);
        let dst = resolve_path(&env.cwd, dst_arg);

        if fs::metadata(&src).is_err() {
            return Err(FsxError::Command("Source not found".to_string()));
        }

        let dst_final = resolve_destination(&src, &dst)?;
        check_destination_parent(&dst_final)?;
        if dst_final.exists() {
            return Err(FsxError::Command("Invalid target path".to_string()));
        }

        if fs::rename(&src, &dst_final).is_ok() {
            return Ok(CommandOutput::None);
        }

        // Rename can fail across filesystem boundaries; fall back to
        // copy-then-delete, which only works for regular files.
        let src_is_file = fs::metadata(&src).map(|m| m.is_file()).unwrap_or(false);
        if !src_is_file {
            return Err(FsxError::Command("Invalid target path".to_string()));
        }
        fs::copy(&src, &dst_final)
            .map_err(|_| FsxError::Command("Invalid target path".to_string()))?;
        fs::remove_file(&src)
            .map_err(|_| FsxError::Command("Invalid target path".to_string()))?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// du
// ---------------------------------------------------------------------------

struct DuCmd;
impl Command for DuCmd {
    fn name(&self) -> &str {
        "du"
    }
    fn description(&self) -> &str {
        "Calculate total directory size"
    }
    fn usage(&self) -> &str {
        "du [dir]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(arg) = args.first() else {
            return Err(FsxError::Command(
                "Missing directory name: Please enter 'du [name]'".to_string(),
            ));
        };
        let path = resolve_path(&env.cwd, arg);
        if !path.is_dir() {
            return Err(FsxError::Command(format!("Invalid directory: {arg}")));
        }
        let bytes = subtree_file_size(&path);
        Ok(CommandOutput::Text(format!(
            "Total size of {arg}: {}",
            format_rounded_size(bytes)
        )))
    }
}
