//! Command trait, registry, tokenizer, and table rendering.
//!
//! Input lines support single quotes, double quotes, and backslash escapes.
//! There is deliberately no piping, variable expansion, globbing, or
//! history: each line is one command and its arguments.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fsx_types::{FsxError, Result};

/// Output produced by a command.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Tabular data (header row + data rows) with per-column alignment.
    Table {
        headers: Vec<String>,
        align: Vec<Align>,
        rows: Vec<Vec<String>>,
    },
    /// Command produced no visible output.
    None,
    /// Signal to the app to leave the read-eval-print loop.
    Exit,
}

/// Column alignment for table output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Blocking yes/no question gating destructive or overwriting operations.
///
/// Implementations read one answer per call; only an affirmative reply
/// returns `true`. End-of-input counts as declining.
pub trait Prompter {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Session state passed to every command.
///
/// `cwd` is the one piece of mutable session state: every relative path is
/// resolved against it at call time, and only `cd` writes it. The process
/// working directory is never touched, so tests can run commands against a
/// scratch directory without chdir-ing.
pub struct Environment<'a> {
    /// Absolute current working directory of this session.
    pub cwd: PathBuf,
    /// Confirmation source for `rm` and overwriting `cp`.
    pub prompter: &'a mut dyn Prompter,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "ls \[-s|-t\]").
    fn usage(&self) -> &str;

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Registry of available commands with dispatch.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Parse and execute one command line.
    ///
    /// A blank line is a no-op. A tokenizer failure rejects the whole line.
    /// An unknown first token is a `Command` error; the caller prints it and
    /// keeps the loop running.
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let tokens = tokenize(line)?;
        if tokens.is_empty() {
            return Ok(CommandOutput::None);
        }

        let name = tokens[0].as_str();
        let args: Vec<&str> = tokens[1..].iter().map(|s| s.as_str()).collect();

        // help needs the command list, so the registry handles it directly.
        if name == "help" {
            return Ok(self.render_help());
        }

        log::debug!("dispatching '{name}' with {} args", args.len());
        match self.commands.get(name) {
            Some(cmd) => cmd.execute(&args, env),
            None => Err(FsxError::Command(format!("Unknown command: {name}"))),
        }
    }

    fn render_help(&self) -> CommandOutput {
        let mut entries: Vec<(String, String)> = self
            .commands
            .values()
            .map(|c| (c.usage().to_string(), c.description().to_string()))
            .collect();
        entries.push(("help".to_string(), "Show all commands".to_string()));
        entries.sort();

        let mut out = String::from("Supported commands:");
        for (usage, desc) in &entries {
            out.push_str(&format!("\n  {usage}: {desc}"));
        }
        CommandOutput::Text(out)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a user-supplied path against the session working directory.
pub fn resolve_path(cwd: &Path, arg: &str) -> PathBuf {
    let path = Path::new(arg);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Split a command line into tokens, honoring quoting and escaping.
///
/// A backslash escapes the next character anywhere, including inside
/// quotes. Inside single or double quotes only the matching close quote is
/// special. Unquoted space, tab, newline, and carriage return separate
/// tokens. An open quote or trailing backslash at end of line rejects the
/// whole line.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_single = false;
    let mut in_double = false;
    let mut escape_next = false;

    for ch in input.chars() {
        if escape_next {
            current.push(ch);
            escape_next = false;
            continue;
        }
        if ch == '\\' {
            escape_next = true;
            continue;
        }
        if in_single {
            if ch == '\'' {
                in_single = false;
            } else {
                current.push(ch);
            }
            continue;
        }
        if in_double {
            if ch == '"' {
                in_double = false;
            } else {
                current.push(ch);
            }
            continue;
        }
        match ch {
            '\'' => in_single = true,
            '"' => in_double = true,
            ' ' | '\t' | '\n' | '\r' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if escape_next {
        return Err(FsxError::Parse("dangling escape".to_string()));
    }
    if in_single || in_double {
        return Err(FsxError::Parse("unmatched quote".to_string()));
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Render a table: every column is as wide as its widest value (header
/// included), columns are separated by a single space, and the last column
/// is never padded on the right.
pub fn format_table(headers: &[String], align: &[Align], rows: &[Vec<String>]) -> String {
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render_row = |row: &[String]| -> String {
        let mut line = String::new();
        for i in 0..cols {
            let cell = row.get(i).map_or("", |s| s.as_str());
            if i > 0 {
                line.push(' ');
            }
            let pad = widths[i].saturating_sub(cell.chars().count());
            match align.get(i).copied().unwrap_or(Align::Left) {
                Align::Right => {
                    line.push_str(&" ".repeat(pad));
                    line.push_str(cell);
                }
                Align::Left => {
                    line.push_str(cell);
                    if i + 1 < cols {
                        line.push_str(&" ".repeat(pad));
                    }
                }
            }
        }
        line
    };

    let mut out = render_row(headers);
    for row in rows {
        out.push('\n');
        out.push_str(&render_row(row));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoPrompter;
    impl Prompter for NoPrompter {
        fn confirm(&mut self, _prompt: &str) -> bool {
            false
        }
    }

    fn exec(reg: &CommandRegistry, line: &str) -> Result<CommandOutput> {
        let mut prompter = NoPrompter;
        let mut env = Environment {
            cwd: std::env::temp_dir(),
            prompter: &mut prompter,
        };
        reg.execute(line, &mut env)
    }

    #[test]
    fn tokenize_simple() {
        assert_eq!(tokenize("a b").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn tokenize_single_quotes() {
        assert_eq!(tokenize("'a b' c").unwrap(), vec!["a b", "c"]);
    }

    #[test]
    fn tokenize_double_quotes() {
        assert_eq!(tokenize(r#"echo "hello world""#).unwrap(), vec![
            "echo",
            "hello world"
        ]);
    }

    #[test]
    fn tokenize_backslash_escape() {
        assert_eq!(tokenize(r"a\ b").unwrap(), vec!["a b"]);
    }

    #[test]
    fn tokenize_escape_applies_inside_quotes() {
        assert_eq!(tokenize(r#""a\"b""#).unwrap(), vec![r#"a"b"#]);
        assert_eq!(tokenize(r"'a\'b'").unwrap(), vec!["a'b"]);
    }

    #[test]
    fn tokenize_mixed_whitespace() {
        assert_eq!(tokenize("a\tb\r\nc").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn tokenize_empty_line() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   \t ").unwrap().is_empty());
    }

    #[test]
    fn tokenize_unterminated_quote_fails() {
        assert!(tokenize("\"unterminated").is_err());
        assert!(tokenize("'open").is_err());
    }

    #[test]
    fn tokenize_dangling_escape_fails() {
        assert!(tokenize("abc\\").is_err());
    }

    #[test]
    fn tokenize_empty_quotes_produce_no_token() {
        assert!(tokenize("''").unwrap().is_empty());
    }

    #[test]
    fn unknown_command_is_an_error() {
        let reg = CommandRegistry::new();
        let err = exec(&reg, "frobnicate x").unwrap_err();
        assert!(format!("{err}").contains("Unknown command: frobnicate"));
    }

    #[test]
    fn blank_line_is_a_noop() {
        let reg = CommandRegistry::new();
        assert!(matches!(exec(&reg, "  ").unwrap(), CommandOutput::None));
    }

    #[test]
    fn help_lists_registered_commands() {
        struct Dummy;
        impl Command for Dummy {
            fn name(&self) -> &str {
                "dummy"
            }
            fn description(&self) -> &str {
                "Do nothing"
            }
            fn usage(&self) -> &str {
                "dummy"
            }
            fn execute(&self, _: &[&str], _: &mut Environment<'_>) -> Result<CommandOutput> {
                Ok(CommandOutput::None)
            }
        }
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Dummy));
        match exec(&reg, "help").unwrap() {
            CommandOutput::Text(s) => {
                assert!(s.contains("dummy: Do nothing"));
                assert!(s.contains("help"));
            }
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn table_widths_track_longest_value() {
        let headers = vec!["Name".to_string(), "Size(B)".to_string()];
        let align = vec![Align::Left, Align::Right];
        let rows = vec![
            vec!["longest-name".to_string(), "5".to_string()],
            vec!["b".to_string(), "12345678".to_string()],
        ];
        let out = format_table(&headers, &align, &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name          Size(B)");
        assert_eq!(lines[1], "longest-name        5");
        assert_eq!(lines[2], "b            12345678");
    }

    #[test]
    fn table_last_column_has_no_trailing_spaces() {
        let headers = vec!["Name".to_string(), "Modify Time".to_string()];
        let align = vec![Align::Left, Align::Left];
        let rows = vec![vec!["a".to_string(), "-".to_string()]];
        let out = format_table(&headers, &align, &rows);
        for line in out.lines() {
            assert_eq!(line, line.trim_end());
        }
    }

    #[test]
    fn resolve_path_handles_absolute_and_relative() {
        let cwd = Path::new("/base");
        assert_eq!(resolve_path(cwd, "/abs/x"), PathBuf::from("/abs/x"));
        assert_eq!(resolve_path(cwd, "rel"), PathBuf::from("/base/rel"));
    }
}
