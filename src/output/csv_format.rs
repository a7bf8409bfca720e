//! CSV output formatting.

use crate::storage::AccountEntry;
use std::io;

/// Print the ban report in CSV format.
pub fn print_csv(entries: &[AccountEntry], include_clean: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    // Write header
    wtr.write_record(["id", "status", "report_date", "banned_date"])?;

    for entry in entries {
        if !include_clean && !entry.is_banned() {
            continue;
        }
        let report_date = entry.report_date.format("%Y-%m-%d").to_string();
        let banned_date = entry
            .banned_date
            .map_or(String::new(), |d| d.format("%Y-%m-%d").to_string());
        wtr.write_record([
            entry.id.as_str(),
            if entry.is_banned() { "banned" } else { "clean" },
            report_date.as_str(),
            banned_date.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
