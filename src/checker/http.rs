//! HTTP ban checker.
//!
//! Fetches an account's community profile page and scans the accumulated
//! body for the ban-information marker. HTTP error statuses are not special:
//! whatever body comes back is scanned like any other, matching the original
//! tool's behavior of only failing on transport errors.

use super::{BanChecker, BAN_MARKER};
use crate::error::CheckResult;
use crate::types::AccountId;
use async_trait::async_trait;
use reqwest::Client;

/// Community site queried for profile pages unless overridden.
pub const DEFAULT_COMMUNITY_URL: &str = "https://steamcommunity.com";

/// Ban checker backed by the community web site.
pub struct HttpChecker {
    client: Client,
    base_url: String,
}

impl HttpChecker {
    /// Create a checker against the default community site.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_COMMUNITY_URL)
    }

    /// Create a checker against a specific base URL.
    ///
    /// Used by the `community_url` setting and by tests pointing at a local
    /// mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the profile URL for an account.
    ///
    /// Numeric ids are requested via `/profiles/`, while anything else uses
    /// `/id/`.
    fn profile_url(&self, account: &AccountId) -> String {
        if account.is_numeric() {
            format!("{}/profiles/{}", self.base_url, account)
        } else {
            format!("{}/id/{}", self.base_url, account)
        }
    }
}

impl Default for HttpChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BanChecker for HttpChecker {
    async fn check(&self, account: &AccountId) -> CheckResult<bool> {
        let url = self.profile_url(account);
        let body = self.client.get(&url).send().await?.text().await?;
        Ok(body.contains(BAN_MARKER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn id(s: &str) -> AccountId {
        AccountId::new(s).unwrap()
    }

    #[test]
    fn test_numeric_id_uses_profiles_path() {
        let checker = HttpChecker::with_base_url("http://example.test");
        assert_eq!(
            checker.profile_url(&id("76561197960287930")),
            "http://example.test/profiles/76561197960287930"
        );
    }

    #[test]
    fn test_vanity_id_uses_id_path() {
        let checker = HttpChecker::with_base_url("http://example.test/");
        assert_eq!(
            checker.profile_url(&id("exampleVanity")),
            "http://example.test/id/exampleVanity"
        );
    }

    #[test]
    fn test_digits_with_suffix_is_vanity() {
        let checker = HttpChecker::with_base_url("http://example.test");
        assert_eq!(
            checker.profile_url(&id("123abc")),
            "http://example.test/id/123abc"
        );
    }

    #[tokio::test]
    async fn test_marker_in_body_means_banned() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/profiles/76561197960287930");
                then.status(200)
                    .body("<html>...profile_ban_info...</html>");
            })
            .await;

        let checker = HttpChecker::with_base_url(server.base_url());
        let banned = checker.check(&id("76561197960287930")).await.unwrap();

        mock.assert_async().await;
        assert!(banned);
    }

    #[tokio::test]
    async fn test_body_without_marker_means_clean() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/id/exampleVanity");
                then.status(200).body("<html>nothing here</html>");
            })
            .await;

        let checker = HttpChecker::with_base_url(server.base_url());
        let banned = checker.check(&id("exampleVanity")).await.unwrap();
        assert!(!banned);
    }

    #[tokio::test]
    async fn test_http_error_status_body_is_still_scanned() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/id/gone");
                then.status(404).body("not found");
            })
            .await;

        let checker = HttpChecker::with_base_url(server.base_url());
        assert!(!checker.check(&id("gone")).await.unwrap());
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_error() {
        // Port 1 is almost certainly not listening.
        let checker = HttpChecker::with_base_url("http://127.0.0.1:1");
        assert!(checker.check(&id("whoever")).await.is_err());
    }
}
