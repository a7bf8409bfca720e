//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `vacwatch add <id>...` - Track accounts
//! - `vacwatch update` - Re-verify ban status
//! - `vacwatch list` - Report tracked accounts

mod add;
mod list;
mod update;

pub use add::AddCommand;
pub use list::ListCommand;
pub use update::UpdateCommand;

use crate::config::Paths;
use crate::error::CliResult;
use crate::storage::BanStore;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// vacwatch - track Steam accounts and watch for VAC bans.
///
/// Accounts are kept in a local flat file. `update` re-verifies their ban
/// status against the community site with a bounded number of checks in
/// flight.
#[derive(Parser, Debug)]
#[command(name = "vacwatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track Steam accounts and watch for VAC bans", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the account store file
    #[arg(short = 'd', long = "db", global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Track one or more accounts
    #[command(alias = "a")]
    Add(AddCommand),

    /// Re-verify the ban status of tracked accounts
    #[command(alias = "u")]
    Update(UpdateCommand),

    /// Report tracked accounts and their ban status
    #[command(alias = "l", alias = "ls")]
    List(ListCommand),
}

/// Output format for the ban report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Plain
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Open the store for this invocation, returning it together with the path
/// it will be saved to.
///
/// An explicit `--db` path must load; its absence is an error. Without
/// `--db`, a missing default store file just means nothing is tracked yet.
pub(crate) fn open_store(db: Option<&Path>) -> CliResult<(BanStore, PathBuf)> {
    match db {
        Some(path) => Ok((BanStore::load(path)?, path.to_path_buf())),
        None => {
            let path = Paths::get().store_file();
            if path.exists() {
                let store = BanStore::load(&path)?;
                Ok((store, path))
            } else {
                Ok((BanStore::new()?, path))
            }
        }
    }
}
