//! # vacwatch - VAC Ban Tracking for Steam Accounts
//!
//! vacwatch keeps a local list of Steam community accounts and watches for
//! VAC bans, re-verifying accounts against the community site with a fixed
//! number of checks in flight at once.
//!
//! ## Features
//!
//! - **Flat-File Store**: One colon-delimited record per account; entries
//!   are only ever appended, never deleted or re-ordered
//! - **Bounded Concurrent Checks**: A fixed-size slot pool keeps at most N
//!   verifications in flight, reaping each slot before reuse
//! - **First-Observation Ban Dates**: A repeated positive result keeps the
//!   earliest observed ban date; a negative result clears the mark
//! - **Flexible Input**: Bare ids, vanity names, or pasted profile URLs
//! - **Multiple Output Formats**: Plain text, JSON, and CSV reports
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use vacwatch::checker::HttpChecker;
//! use vacwatch::storage::BanStore;
//! use vacwatch::types::AccountId;
//! use vacwatch::update::{run_update, UpdateConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut store = BanStore::new().unwrap();
//!     store.track(AccountId::new("76561197960287930").unwrap()).unwrap();
//!
//!     let checker = Arc::new(HttpChecker::new());
//!     let summary = run_update(&mut store, checker, UpdateConfig::default())
//!         .await
//!         .unwrap();
//!
//!     println!("{} banned", summary.banned);
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`types`] - Core type definitions with newtype patterns for type safety
//! - [`storage`] - The flat-file account store
//! - [`checker`] - Ban status checkers and the `BanChecker` trait
//! - [`update`] - The bounded-concurrency verification scheduler
//! - [`config`] - Paths and application settings
//! - [`error`] - Comprehensive error types
//! - [`output`] - Output formatting utilities

pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod storage;
pub mod types;
pub mod update;

// Re-export commonly used types
pub use checker::{BanChecker, HttpChecker};
pub use error::{CheckError, CliError, StoreError, UpdateError};
pub use storage::{AccountEntry, BanStore};
pub use types::AccountId;
pub use update::{run_update, UpdateConfig, UpdateSummary};
