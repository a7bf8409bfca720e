//! JSON output formatting.

use crate::storage::AccountEntry;
use std::io;

/// Print the ban report in JSON format.
pub fn print_json(entries: &[AccountEntry], include_clean: bool) -> io::Result<()> {
    let report: Vec<&AccountEntry> = entries
        .iter()
        .filter(|e| include_clean || e.is_banned())
        .collect();

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}
