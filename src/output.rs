//! Output formatting and styling module.
//!
//! Everything the command line prints goes through [`OutputFormatter`], so the
//! core pipeline stays silent and the look can be changed in one place.

use crate::planner::MovePair;
use crate::summary::Summary;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use organizer::output::OutputFormatter;
    /// OutputFormatter::success("Files moved successfully.");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red on stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    pub fn plain(message: &str) {
        println!("{}", message);
    }

    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Formats one planned move as `source -> destination [Category]`.
    pub fn format_move(pair: &MovePair) -> String {
        format!(
            "{} -> {} [{}]",
            pair.source.display(),
            pair.destination.display(),
            pair.category().unwrap_or("?")
        )
    }

    /// Prints one planned move.
    pub fn plan_line(pair: &MovePair) {
        println!("{}", Self::format_move(pair));
    }

    /// Creates a progress bar for `total` moves.
    ///
    /// ```no_run
    /// use organizer::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(10);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Prints the per-category summary as a table with a total row.
    ///
    /// Rows keep the summary's own (case-insensitive) order.
    pub fn summary_table(title: &str, summary: &Summary) {
        Self::header(title);

        let width = summary
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Category".len());

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (category, count) in summary.iter() {
            println!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                file_word(count),
                width = width
            );
        }

        let total = summary.total();
        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            file_word(total),
            width = width
        );
    }
}

fn file_word(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
