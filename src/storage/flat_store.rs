//! Flat-file account storage.
//!
//! The store file is plain UTF-8 text, one record per line, three fields
//! joined by `:` in order: id, report date, ban date (decimal seconds since
//! the Unix epoch, `0` meaning "not known to be banned"). Records are only
//! ever appended; nothing deletes or re-orders them.

use crate::error::{StoreError, StoreResult};
use crate::types::AccountId;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Field separator of the store format. Fields are not escaped: an id
/// containing the separator corrupts its record.
pub const FIELD_SEPARATOR: char = ':';

/// Capacity reserved by a fresh store before the first append.
const DEFAULT_CAPACITY: usize = 64;

/// One tracked account and its last-known ban status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountEntry {
    /// The tracked account identifier.
    pub id: AccountId,
    /// When the account was first added. Set once, never touched again.
    pub report_date: DateTime<Utc>,
    /// When a ban was first observed; `None` while the account is not known
    /// to be banned. Written only by the update scheduler.
    pub banned_date: Option<DateTime<Utc>>,
}

impl AccountEntry {
    /// Create a fresh entry, reported now and not known to be banned.
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            report_date: Utc::now(),
            banned_date: None,
        }
    }

    /// Whether the account is currently known to be banned.
    pub fn is_banned(&self) -> bool {
        self.banned_date.is_some()
    }

    /// Parse one store line. `line_no` is 1-based and only used for the
    /// error path.
    fn from_record(line: &str, path: &Path, line_no: usize) -> StoreResult<Self> {
        let malformed = || StoreError::MalformedRecord {
            path: path.to_path_buf(),
            line: line_no,
        };

        let mut fields = line.split(FIELD_SEPARATOR);
        let id = fields.next().ok_or_else(malformed)?;
        let report = fields.next().ok_or_else(malformed)?;
        let banned = fields.next().ok_or_else(malformed)?;
        if fields.next().is_some() {
            return Err(malformed());
        }

        let id = AccountId::new(id).map_err(|_| malformed())?;
        let report_date = parse_epoch(report).ok_or_else(malformed)?;
        let banned_date = if banned == "0" {
            None
        } else {
            Some(parse_epoch(banned).ok_or_else(malformed)?)
        };

        Ok(Self {
            id,
            report_date,
            banned_date,
        })
    }

    /// Serialize the entry into one store line (without the newline).
    fn to_record(&self) -> String {
        format!(
            "{id}{sep}{report}{sep}{banned}",
            id = self.id,
            report = self.report_date.timestamp(),
            banned = self.banned_date.map_or(0, |d| d.timestamp()),
            sep = FIELD_SEPARATOR,
        )
    }
}

/// Insertion-ordered, append-only store of tracked accounts.
#[derive(Debug)]
pub struct BanStore {
    entries: Vec<AccountEntry>,
}

impl BanStore {
    /// Create an empty store with the default capacity reserved.
    pub fn new() -> StoreResult<Self> {
        let mut entries = Vec::new();
        entries.try_reserve(DEFAULT_CAPACITY)?;
        Ok(Self { entries })
    }

    /// Load a store from a flat file.
    ///
    /// Every line must hold exactly three `:`-separated fields; the first
    /// malformed line aborts the whole load.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut store = Self::new()?;
        for (idx, line) in content.lines().enumerate() {
            let entry = AccountEntry::from_record(line, path, idx + 1)?;
            store.push(entry)?;
        }

        Ok(store)
    }

    /// Find an entry by exact id.
    ///
    /// Linear scan; the store keeps no index. O(n) per call is fine at the
    /// account counts this tool targets.
    pub fn lookup(&self, id: &AccountId) -> Option<&AccountEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Append an entry unconditionally.
    ///
    /// `push` never inspects existing ids; duplicate detection is the
    /// caller's job (`track` performs it via `lookup`).
    pub fn push(&mut self, entry: AccountEntry) -> StoreResult<()> {
        self.entries.try_reserve(1)?;
        self.entries.push(entry);
        Ok(())
    }

    /// Track a new account: the duplicate-checked add exposed to the CLI.
    ///
    /// Returns `StoreError::DuplicateEntry` without touching the store if
    /// the id is already present.
    pub fn track(&mut self, id: AccountId) -> StoreResult<()> {
        if let Some(existing) = self.lookup(&id) {
            return Err(StoreError::DuplicateEntry {
                id: existing.id.clone(),
                reported: existing.report_date,
            });
        }
        self.push(AccountEntry::new(id))
    }

    /// Serialize the store back to disk.
    ///
    /// Truncates and rewrites the whole file, one record per line in store
    /// order. The write is not atomic: a failure or crash mid-write leaves
    /// a truncated file behind.
    pub fn save(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let mut content = String::new();
        for entry in &self.entries {
            content.push_str(&entry.to_record());
            content.push('\n');
        }

        fs::write(path, content).map_err(|e| StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// All entries in store order.
    pub fn entries(&self) -> &[AccountEntry] {
        &self.entries
    }

    /// Mutable access to one entry by store index.
    pub fn entry_mut(&mut self, index: usize) -> Option<&mut AccountEntry> {
        self.entries.get_mut(index)
    }

    /// Number of tracked accounts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_epoch(field: &str) -> Option<DateTime<Utc>> {
    let secs: i64 = field.parse().ok()?;
    Utc.timestamp_opt(secs, 0).single()
}
