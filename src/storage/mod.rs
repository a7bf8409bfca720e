//! Account store persistence.
//!
//! Provides the flat-file backed store of tracked accounts and their
//! last-known ban status.

mod flat_store;

pub use flat_store::{AccountEntry, BanStore, FIELD_SEPARATOR};
