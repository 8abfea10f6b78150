mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{init, lint, InitArgs, LintArgs};
use sassline_linter::ConfigError;
use tracing_subscriber::EnvFilter;

/// Sassline - style checks for SCSS variable declarations
#[derive(Parser, Debug)]
#[command(name = "sassline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default sassline.config.json
    Init(InitArgs),

    /// Lint (or fix) .scss files
    Lint(LintArgs),
}

/// Exit code for runs that found errors
const EXIT_LINT_ERRORS: i32 = 1;
/// Exit code for invalid configuration; nothing was linted
const EXIT_CONFIG_ERROR: i32 = 2;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(EXIT_LINT_ERRORS);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd).map(|_| true),
        Command::Lint(args) => lint(args, &cwd),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_LINT_ERRORS),
        Err(err) => {
            eprintln!();
            eprintln!("{} {}", "Error:".red().bold(), err);
            eprintln!();
            let code = if err.downcast_ref::<ConfigError>().is_some() {
                EXIT_CONFIG_ERROR
            } else {
                EXIT_LINT_ERRORS
            };
            std::process::exit(code);
        }
    }
}
