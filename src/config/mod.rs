//! Configuration management for vacwatch.
//!
//! Provides XDG-compliant configuration storage: application paths and
//! persisted settings.

mod settings;

pub use settings::{AppSettings, Paths};
