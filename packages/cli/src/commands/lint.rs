use crate::config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use glob::Pattern;
use sassline_common::SourceFile;
use sassline_linter::{lint_stylesheet, Diagnostic, DiagnosticLevel, LintConfig, LintOptions};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct LintArgs {
    /// Input .scss file or directory to lint
    pub input: PathBuf,

    /// Rewrite violations in place instead of reporting them
    #[arg(long)]
    pub fix: bool,

    /// Show all diagnostics including info level, and clean files
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Config file (defaults to sassline.config.json in the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Error, Debug)]
enum LintCommandError {
    #[error("Input path does not exist: {0}")]
    MissingInput(PathBuf),

    #[error("Unknown output format '{0}' (use text or json)")]
    UnknownFormat(String),

    #[error("Invalid include pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

/// Diagnostics for one file, as written by `--format json`
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    diagnostics: Vec<Diagnostic>,
    fixes: usize,
    /// Parse failure; the file was not linted
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// The parse failure as a source snippet, for text output
    #[serde(skip)]
    rendered_error: Option<String>,
}

#[derive(Debug, Default)]
struct Totals {
    files: usize,
    diagnostics: usize,
    errors: usize,
    warnings: usize,
    fixes: usize,
}

/// Returns Ok(false) when errors remain
pub fn lint(args: LintArgs, cwd: &Path) -> Result<bool> {
    let format = match args.format.as_str() {
        "text" => Format::Text,
        "json" => Format::Json,
        other => return Err(LintCommandError::UnknownFormat(other.to_string()).into()),
    };

    // Configuration problems stop the run before any file is read
    let lint_config = config::load(cwd, args.config.as_deref())?;
    lint_config.registry()?;

    let input = cwd.join(&args.input);
    let files = if input.is_file() {
        vec![input.clone()]
    } else if input.is_dir() {
        find_scss_files(&input, &lint_config)?
    } else {
        return Err(LintCommandError::MissingInput(args.input).into());
    };

    if format == Format::Text {
        println!("🔍 {} Sassline", "Starting".green().bold());
        println!("   Input: {}", args.input.display());
        if input.is_dir() {
            println!("   Found {} .scss files", files.len());
        }
        println!();
    }

    let mut totals = Totals::default();
    let mut reports = Vec::new();

    for path in &files {
        let report = lint_file(cwd, path, &lint_config, args.fix)?;

        if report.error.is_some() {
            totals.errors += 1;
        } else {
            totals.files += 1;
            totals.fixes += report.fixes;
            totals.diagnostics += report.diagnostics.len();
            totals.errors += count_level(&report.diagnostics, DiagnosticLevel::Error);
            totals.warnings += count_level(&report.diagnostics, DiagnosticLevel::Warning);
        }

        match format {
            Format::Json => reports.push(report),
            Format::Text => match &report.rendered_error {
                Some(rendered) => eprintln!("{} {}", "✗".red(), rendered),
                None => print_text(&report.path, &report.diagnostics, report.fixes, args.verbose),
            },
        }
    }

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        Format::Text => print_summary(&totals, args.fix),
    }

    Ok(totals.errors == 0)
}

/// Lint one file, writing fixes back in fix mode. A parse failure is
/// returned in the report rather than as an error.
fn lint_file(cwd: &Path, path: &Path, config: &LintConfig, fix: bool) -> Result<FileReport> {
    let file = SourceFile::load(path)?;
    let mut report = FileReport {
        path: display_path(cwd, path),
        diagnostics: Vec::new(),
        fixes: 0,
        error: None,
        rendered_error: None,
    };

    let stylesheet = match file.parse() {
        Ok(stylesheet) => stylesheet,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "parse failed");
            report.rendered_error = Some(file.render_error(&err));
            report.error = Some(err.to_string());
            return Ok(report);
        }
    };

    let lint_report = lint_stylesheet(
        &stylesheet,
        LintOptions {
            registry: Some(config.registry()?),
            fix,
        },
    );
    info!(path = %path.display(), diagnostics = lint_report.diagnostics.len(), fixes = lint_report.fixes, "linted file");

    if let Some(fixed) = lint_report.fixed_source() {
        if file.write(&fixed)? {
            debug!(path = %path.display(), "wrote fixes");
        }
    }

    report.diagnostics = lint_report.diagnostics;
    report.fixes = lint_report.fixes;
    Ok(report)
}

fn count_level(diagnostics: &[Diagnostic], level: DiagnosticLevel) -> usize {
    diagnostics.iter().filter(|d| d.level == level).count()
}

fn print_text(path: &str, diagnostics: &[Diagnostic], fixes: usize, verbose: bool) {
    if diagnostics.is_empty() {
        if fixes > 0 {
            println!("{} {} ({} fixed)", "✓".green(), path, fixes);
        } else if verbose {
            println!("{} {}", "✓".green(), path);
        }
        return;
    }

    println!("{}", path);

    for diagnostic in diagnostics {
        let level_str = match diagnostic.level {
            DiagnosticLevel::Error => "error".red().bold(),
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };

        if !verbose && diagnostic.level == DiagnosticLevel::Info {
            continue;
        }

        println!(
            "  {}:{}  {}  {}",
            diagnostic.position.line, diagnostic.position.column, level_str, diagnostic.message
        );

        if let Some(suggestion) = &diagnostic.suggestion {
            println!("    {} {}", "💡".dimmed(), suggestion.dimmed());
        }
    }

    println!();
}

fn print_summary(totals: &Totals, fix: bool) {
    println!();
    println!(
        "✨ {} Linting complete!",
        if totals.errors > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Files checked: {}", totals.files);
    println!("   Total diagnostics: {}", totals.diagnostics);

    if fix {
        println!("   Fixed: {}", totals.fixes);
    }
    if totals.errors > 0 {
        println!("   {} {}", "Errors:".red(), totals.errors);
    }
    if totals.warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), totals.warnings);
    }
    if totals.errors == 0 && totals.warnings == 0 {
        println!("   {} No issues found!", "✓".green());
    }
}

fn display_path(cwd: &Path, path: &Path) -> String {
    path.strip_prefix(cwd).unwrap_or(path).display().to_string()
}

/// Files under `dir` matching the config's include patterns, sorted
fn find_scss_files(dir: &Path, config: &LintConfig) -> Result<Vec<PathBuf>> {
    let patterns = config
        .include
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| LintCommandError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(dir).unwrap_or(path);
        if patterns.iter().any(|pattern| pattern.matches_path(relative)) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
