//! Ban status checking.
//!
//! Defines the `BanChecker` trait and its HTTP implementation. The trait
//! seam exists so the update scheduler can be driven by mock checkers in
//! tests, the same way different probes plug into a common interface.

mod http;

pub use http::{HttpChecker, DEFAULT_COMMUNITY_URL};

use crate::error::CheckResult;
use crate::types::AccountId;
use async_trait::async_trait;

/// Marker substring whose presence anywhere in a profile page body declares
/// the account banned.
pub const BAN_MARKER: &str = "profile_ban_info";

/// Trait for ban status checkers.
#[async_trait]
pub trait BanChecker: Send + Sync {
    /// Verify one account, returning whether it is currently banned.
    ///
    /// Issues exactly one request. A transport failure is an error here;
    /// the scheduler degrades it to "not banned".
    async fn check(&self, account: &AccountId) -> CheckResult<bool>;
}
