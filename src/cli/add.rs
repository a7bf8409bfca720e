//! Add subcommand implementation.
//!
//! Handles `vacwatch add <id>...` for tracking new accounts.

use crate::error::{CliResult, StoreError};
use crate::output;
use crate::types::AccountId;
use clap::Parser;
use std::path::Path;

/// Track one or more accounts.
#[derive(Parser, Debug)]
pub struct AddCommand {
    /// Accounts to track: bare ids or profile URLs
    ///
    /// Examples:
    ///   76561197960287930                                  Numeric id
    ///   exampleVanity                                      Vanity name
    ///   http://steamcommunity.com/profiles/76561197960287930/   Profile URL
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

impl AddCommand {
    /// Execute the add command.
    pub fn execute(&self, db: Option<&Path>, quiet: bool) -> CliResult<()> {
        let (mut store, path) = super::open_store(db)?;
        let mut added = 0;

        for raw in &self.ids {
            let id = match AccountId::from_input(raw) {
                Ok(id) => id,
                Err(err) => {
                    output::print_warning(&format!("skipping '{}': {}", raw, err));
                    continue;
                }
            };

            match store.track(id.clone()) {
                Ok(()) => {
                    added += 1;
                    if !quiet {
                        output::print_info(&format!("now watching '{}'", id));
                    }
                }
                Err(err @ StoreError::DuplicateEntry { .. }) => {
                    output::print_warning(&err.to_string());
                }
                Err(err) => return Err(err.into()),
            }
        }

        if added > 0 {
            store.save(&path)?;
        }

        Ok(())
    }
}
