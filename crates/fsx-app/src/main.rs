//! fsx console entry point.
//!
//! Reads one command line at a time from stdin, executes it against the
//! session working directory, prints the result, and loops. An optional
//! command-line argument names the starting directory. End-of-input on the
//! prompt exits cleanly; `exit` prints a close message first.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use fsx_terminal::{CommandOutput, CommandRegistry, Environment, Prompter, format_table,
    register_builtins};

/// Confirmation prompter that writes the question to stdout and reads one
/// answer line from stdin. Anything but a literal `y` (EOF included)
/// declines.
struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt}");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => answer.trim_end_matches(['\n', '\r']) == "y",
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Optional starting directory; an invalid one aborts before the loop.
    let cwd = match std::env::args().nth(1) {
        Some(arg) => match std::fs::canonicalize(&arg) {
            Ok(path) if path.is_dir() => path,
            _ => {
                println!("Directory not found: {arg}");
                return ExitCode::FAILURE;
            }
        },
        None => match std::env::current_dir() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Failed to get current working directory: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    log::info!("starting fsx in {}", cwd.display());
    println!("Current Directory: {}", cwd.display());

    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);

    match run_loop(&registry, cwd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run_loop(registry: &CommandRegistry, mut cwd: PathBuf) -> anyhow::Result<()> {
    let mut line = String::new();
    loop {
        print!("Enter command (type 'help' for all commands): ");
        io::stdout().flush()?;

        line.clear();
        if io::stdin().read_line(&mut line)? == 0 {
            // End of input: leave quietly, same as a clean exit.
            return Ok(());
        }

        let mut prompter = StdinPrompter;
        let mut env = Environment {
            cwd: cwd.clone(),
            prompter: &mut prompter,
        };
        match registry.execute(&line, &mut env) {
            Ok(CommandOutput::Exit) => {
                println!("fsx closed successfully");
                return Ok(());
            }
            Ok(CommandOutput::Text(text)) => println!("{text}"),
            Ok(CommandOutput::Table {
                headers,
                align,
                rows,
            }) => println!("{}", format_table(&headers, &align, &rows)),
            Ok(CommandOutput::None) => {}
            Err(e) => println!("{e}"),
        }
        cwd = env.cwd;
    }
}
