//! Account identifier newtype.
//!
//! `AccountId` wraps the opaque, externally-assigned community account
//! identifier, preventing accidental mixups with other strings and keeping
//! the input normalization rules in one place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque community account identifier.
///
/// Either a numeric profile id (`76561197960287930`) or a vanity name
/// (`exampleVanity`). Ids must be non-empty. The flat store joins record
/// fields with `:` and does not escape them, so an id containing `:`
/// corrupts its record on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create an id from an already-normalized string.
    pub fn new(id: impl Into<String>) -> Result<Self, AccountIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AccountIdError::Empty);
        }
        Ok(Self(id))
    }

    /// Normalize free-form input into a bare id.
    ///
    /// Accepts profile URLs as pasted from a browser: everything up to and
    /// including the last path separator is stripped, ignoring a single
    /// trailing one.
    ///
    /// - `http://steamcommunity.com/profiles/76561197960287930` -> `76561197960287930`
    /// - `http://steamcommunity.com/profiles/76561197960287930/` -> `76561197960287930`
    /// - `http://steamcommunity.com/id/exampleVanity/` -> `exampleVanity`
    /// - `76561197960287930` -> `76561197960287930`
    pub fn from_input(input: &str) -> Result<Self, AccountIdError> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let bare = match trimmed.rsplit_once('/') {
            Some((_, tail)) => tail,
            None => trimmed,
        };
        Self::new(bare)
    }

    /// Whether every character of the id is a decimal digit.
    ///
    /// Numeric ids are addressed via the `/profiles/` path; anything else,
    /// including digits followed by a suffix, uses `/id/`.
    pub fn is_numeric(&self) -> bool {
        self.0.chars().all(|c| c.is_ascii_digit())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for account id validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AccountIdError {
    #[error("account id is empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_profile_url() {
        let id = AccountId::from_input("http://steamcommunity.com/profiles/76561197960287930").unwrap();
        assert_eq!(id.as_str(), "76561197960287930");
    }

    #[test]
    fn test_numeric_profile_url_trailing_slash() {
        let id =
            AccountId::from_input("http://steamcommunity.com/profiles/76561197960287930/").unwrap();
        assert_eq!(id.as_str(), "76561197960287930");
    }

    #[test]
    fn test_bare_id_passes_through() {
        let id = AccountId::from_input("76561197960287930").unwrap();
        assert_eq!(id.as_str(), "76561197960287930");
    }

    #[test]
    fn test_vanity_url() {
        let id = AccountId::from_input("http://steamcommunity.com/id/exampleVanity/").unwrap();
        assert_eq!(id.as_str(), "exampleVanity");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(AccountId::from_input("").is_err());
        assert!(AccountId::from_input("http://steamcommunity.com/id//").is_err());
        assert!(AccountId::new("").is_err());
    }

    #[test]
    fn test_numeric_classification() {
        assert!(AccountId::new("76561197960287930").unwrap().is_numeric());
        assert!(!AccountId::new("exampleVanity").unwrap().is_numeric());
        // Leading digits with a suffix are still a vanity name.
        assert!(!AccountId::new("123abc").unwrap().is_numeric());
    }

    #[test]
    fn test_display_roundtrip() {
        let id = AccountId::new("exampleVanity").unwrap();
        assert_eq!(id.to_string(), "exampleVanity");
    }
}
