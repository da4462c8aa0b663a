//! Command-line front end.
//!
//! This module is a thin shell over the library pipeline:
//! - argument parsing
//! - source validation and destination creation
//! - filtering discovered files through the configuration
//! - printing the plan (dry run) or executing it
//! - rendering the summary as text or JSON

use crate::config::{OrganizerConfig, expand_tilde};
use crate::discovery::discover;
use crate::error::{OrganizeError, OrganizeResult};
use crate::executor::{execute_best_effort, execute_with};
use crate::logging::LogLevel;
use crate::output::OutputFormatter;
use crate::planner::{Plan, plan};
use crate::summary::{Summary, summarize};
use clap::{Parser, ValueEnum, ValueHint};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// How results are printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Organizes files by extension into category subfolders.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "organizer",
    author,
    version,
    about = "Organizes files by extension into subfolders"
)]
pub struct Args {
    /// Source folder (default: configured source, else your Downloads folder).
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub src: Option<PathBuf>,

    /// Destination folder (default: configured destination, else ~/Downloads/Organized).
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub dst: Option<PathBuf>,

    /// Only simulate: print the plan and summary, move nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Configuration file (default: .organizerrc.toml, then the user config dir).
    #[arg(short = 'c', long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output format for the plan and summary.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Keep moving after a failed file instead of stopping at the first error.
    #[arg(long)]
    pub keep_going: bool,

    /// Diagnostic log level (written to stderr).
    #[arg(long, value_enum, default_value_t = LogLevel::Normal)]
    pub log_level: LogLevel,

    /// Emit diagnostic logs as JSON.
    #[arg(long)]
    pub log_json: bool,

    /// Do not show a progress bar while moving.
    #[arg(long)]
    pub no_progress: bool,
}

/// Runs the organizer for parsed arguments and returns the summary.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use organizer::cli::{Args, run_cli};
///
/// let args = Args::parse_from(["organizer", "--src", "/tmp/in", "--dst", "/tmp/out", "--dry-run"]);
/// match run_cli(&args) {
///     Ok(summary) => println!("{} files planned", summary.total()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(args: &Args) -> OrganizeResult<Summary> {
    let config = OrganizerConfig::load(args.config.as_deref())?;
    let filters = config.compile_filters()?;
    let table = config.category_table();

    let source = args
        .src
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(|| config.source_dir());
    let destination = args
        .dst
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(|| config.destination_dir());

    let source = validate_source(&source)?;
    let destination = absolute(&destination);
    info!(source = %source.display(), destination = %destination.display(), dry_run = args.dry_run, "organizing");

    if !args.dry_run {
        fs::create_dir_all(&destination).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: destination.clone(),
            source: e,
        })?;
    }

    let (files, excluded) = filters.partition(discover(&source)?);
    for path in &excluded {
        debug!(path = %path.display(), "excluded by filters");
    }
    info!(files = files.len(), excluded = excluded.len(), "discovered");

    let plan = plan(&files, &destination, &table);
    for pair in &plan {
        debug!(from = %pair.source.display(), to = %pair.destination.display(), "planned");
    }

    if args.dry_run {
        let summary = summarize(&plan);
        report(args, &source, &destination, &plan, &summary);
        return Ok(summary);
    }

    if args.keep_going {
        run_best_effort(args, &source, &destination, &plan)
    } else {
        run_abort_on_error(args, &source, &destination, &plan)
    }
}

fn run_abort_on_error(
    args: &Args,
    source: &Path,
    destination: &Path,
    plan: &Plan,
) -> OrganizeResult<Summary> {
    let progress = (args.format == OutputFormat::Text && !args.no_progress && !plan.is_empty())
        .then(|| OutputFormatter::create_progress_bar(plan.len() as u64));

    let result = execute_with(plan, |pair| {
        debug!(from = %pair.source.display(), to = %pair.destination.display(), "moved");
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    });
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    result?;

    info!(moved = plan.len(), "done");
    let summary = summarize(plan);
    report(args, source, destination, plan, &summary);
    Ok(summary)
}

fn run_best_effort(
    args: &Args,
    source: &Path,
    destination: &Path,
    plan: &Plan,
) -> OrganizeResult<Summary> {
    let outcome = execute_best_effort(plan);
    for (pair, error) in &outcome.failed {
        warn!(from = %pair.source.display(), error = %error, "move failed");
        if args.format == OutputFormat::Text {
            OutputFormatter::error(&error.to_string());
        }
    }

    let moved = Plan::from(outcome.moved);
    let summary = summarize(&moved);
    report(args, source, destination, &moved, &summary);

    match outcome.failed.into_iter().next() {
        Some((_, first_error)) => Err(first_error),
        None => Ok(summary),
    }
}

/// Prints the outcome in the requested format.
fn report(args: &Args, source: &Path, destination: &Path, plan: &Plan, summary: &Summary) {
    match args.format {
        OutputFormat::Json => {
            let moves: Vec<_> = plan
                .iter()
                .map(|pair| {
                    json!({
                        "source": pair.source.to_string_lossy(),
                        "destination": pair.destination.to_string_lossy(),
                        "category": pair.category(),
                    })
                })
                .collect();
            let document = json!({
                "dry_run": args.dry_run,
                "source": source.to_string_lossy(),
                "destination": destination.to_string_lossy(),
                "moves": moves,
                "summary": summary,
            });
            let text = serde_json::to_string_pretty(&document)
                .unwrap_or_else(|_| document.to_string());
            OutputFormatter::plain(&text);
        }
        OutputFormat::Text if args.dry_run => {
            if plan.is_empty() {
                OutputFormatter::info("No files found.");
                return;
            }
            for pair in plan {
                OutputFormatter::plan_line(pair);
            }
            OutputFormatter::summary_table("Summary (dry-run):", summary);
            OutputFormatter::dry_run_notice("No files were moved.");
        }
        OutputFormat::Text => {
            if plan.is_empty() {
                OutputFormatter::info("No files found.");
                return;
            }
            OutputFormatter::summary_table("Summary (moved):", summary);
            OutputFormatter::success(&format!(
                "Organized {} into {}",
                source.display(),
                destination.display()
            ));
        }
    }
}

/// Checks that `source` is an existing directory and returns its canonical form.
fn validate_source(source: &Path) -> OrganizeResult<PathBuf> {
    match fs::metadata(source) {
        Ok(meta) if meta.is_dir() => {
            fs::canonicalize(source).map_err(|e| OrganizeError::from_read(source.to_path_buf(), e))
        }
        Ok(_) => Err(OrganizeError::NotADirectory(source.to_path_buf())),
        Err(e) => Err(OrganizeError::from_read(source.to_path_buf(), e)),
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
