//! Terminal output for CLI commands.
//!
//! Kept apart from the extraction engine so glean can be used as a library.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Counts reported after an extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    pub message_count: usize,
    pub file_count: usize,
    pub skipped_count: usize,
}

pub fn print_extract_summary(summary: &ExtractSummary, output: &Path, verbose: bool) {
    print_extract_summary_to(summary, output, verbose, &mut io::stdout().lock());
}

/// Print the extraction summary to a custom writer.
pub fn print_extract_summary_to<W: Write>(
    summary: &ExtractSummary,
    output: &Path,
    verbose: bool,
    writer: &mut W,
) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} {} from {} {} into {}",
            summary.message_count,
            plural(summary.message_count, "message", "messages"),
            summary.file_count,
            plural(summary.file_count, "file", "files"),
            output.display()
        )
        .green()
    );

    if summary.skipped_count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            summary.skipped_count,
            "--verbose".cyan()
        );
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
