//! List subcommand implementation.
//!
//! Handles `vacwatch list` for reporting tracked accounts.

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output;
use clap::Parser;
use std::path::Path;

/// Report tracked accounts and their ban status.
#[derive(Parser, Debug)]
pub struct ListCommand {
    /// Also list accounts that are not banned
    #[arg(short, long)]
    pub all: bool,

    /// Output format for the report
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(&self, db: Option<&Path>) -> CliResult<()> {
        let (store, _path) = super::open_store(db)?;
        output::print_report(store.entries(), self.all, self.output)?;
        Ok(())
    }
}
