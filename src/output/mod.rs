//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of the ban
//! report, plus styled status messages.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::print_csv;
pub use json_format::print_json;
pub use plain::{
    print_error, print_info, print_plain, print_success, print_update_summary, print_warning,
};

use crate::cli::OutputFormat;
use crate::storage::AccountEntry;
use std::io;

/// Format and print the ban report according to the specified format.
///
/// Clean accounts are included only when `include_clean` is set.
pub fn print_report(
    entries: &[AccountEntry],
    include_clean: bool,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_plain(entries, include_clean),
        OutputFormat::Json => json_format::print_json(entries, include_clean),
        OutputFormat::Csv => csv_format::print_csv(entries, include_clean),
    }
}
