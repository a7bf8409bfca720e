//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::storage::AccountEntry;
use crate::update::UpdateSummary;
use console::style;
use std::io::{self, Write};

/// Print the ban report in plain text.
///
/// Banned accounts print with the date they were first reported for
/// watching; clean accounts are listed only when `include_clean` is set.
pub fn print_plain(entries: &[AccountEntry], include_clean: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for entry in entries {
        if entry.is_banned() {
            writeln!(
                out,
                "{} was banned {}",
                style(entry.id.as_str()).red().bold(),
                entry.report_date.format("%Y-%m-%d")
            )?;
        } else if include_clean {
            writeln!(out, "{} is clean", style(entry.id.as_str()).green())?;
        }
    }

    Ok(())
}

/// Print the summary line after an update run.
pub fn print_update_summary(summary: &UpdateSummary) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "{} accounts checked: {} newly banned, {} cleared, {} banned in total",
        style(summary.checked).bold(),
        style(summary.newly_banned).red().bold(),
        style(summary.cleared).green(),
        summary.banned
    )
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
