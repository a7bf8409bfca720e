//! Error types for vacwatch.
//!
//! Uses `thiserror` for ergonomic error definitions. Each subsystem has its
//! own error enum and `Result` alias; `CliError` is the umbrella type the
//! command handlers return.

use crate::types::AccountId;
use chrono::{DateTime, Utc};
use std::collections::TryReserveError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the account store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Memory for the entry table could not be reserved.
    #[error("failed to reserve store memory: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record with a missing or surplus field, or an unparsable timestamp.
    /// The whole load aborts; there is no partial recovery.
    #[error("{}:{line}: malformed record", .path.display())]
    MalformedRecord { path: PathBuf, line: usize },

    /// The id is already tracked. Carries the original report date so the
    /// caller can tell the user when it was first added.
    #[error("'{id}' was already added {}", .reported.format("%Y-%m-%d"))]
    DuplicateEntry {
        id: AccountId,
        reported: DateTime<Utc>,
    },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a single ban check.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type alias for check operations.
pub type CheckResult<T> = Result<T, CheckError>;

/// Fatal errors raised by the verification scheduler.
///
/// A failed check is not represented here: it degrades to a negative result
/// inside the worker task and the run continues.
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("result channel closed before '{account}' reported")]
    ResultChannelClosed { account: AccountId },

    #[error("worker checking '{account}' panicked")]
    WorkerPanicked { account: AccountId },
}

/// Result type alias for update operations.
pub type UpdateResult<T> = Result<T, UpdateError>;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine config/data directories")]
    DirectoryNotFound,

    #[error("failed to read {}: {reason}", .path.display())]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {}: {reason}", .path.display())]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level error type returned by CLI command handlers.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Update(#[from] UpdateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
