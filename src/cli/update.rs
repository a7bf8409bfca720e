//! Update subcommand implementation.
//!
//! Handles `vacwatch update` for re-verifying ban status.

use crate::checker::HttpChecker;
use crate::config::AppSettings;
use crate::error::CliResult;
use crate::output;
use crate::update::{run_update, UpdateConfig};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;

/// Re-verify the ban status of tracked accounts.
#[derive(Parser, Debug)]
pub struct UpdateCommand {
    /// Also re-check accounts already marked banned
    #[arg(short, long)]
    pub recheck: bool,

    /// Number of checks kept in flight (defaults to the settings value)
    #[arg(short = 'c', long, value_name = "N")]
    pub concurrency: Option<usize>,
}

impl UpdateCommand {
    /// Execute the update command.
    pub async fn execute(&self, db: Option<&Path>, verbose: bool, quiet: bool) -> CliResult<()> {
        let settings = AppSettings::load()?;
        let (mut store, path) = super::open_store(db)?;

        if store.is_empty() {
            if !quiet {
                output::print_info("no accounts tracked");
            }
            return Ok(());
        }

        let checker = Arc::new(HttpChecker::with_base_url(&settings.community_url));
        let config = UpdateConfig::default()
            .with_concurrency(self.concurrency.unwrap_or(settings.default_concurrency))
            .with_recheck(self.recheck)
            .with_progress((verbose || settings.verbose) && !quiet);

        let summary = run_update(&mut store, checker, config).await?;
        store.save(&path)?;

        if !quiet {
            output::print_update_summary(&summary)?;
        }

        Ok(())
    }
}
