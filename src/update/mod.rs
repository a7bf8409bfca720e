//! Verification scheduler.
//!
//! Re-verifies tracked accounts against a `BanChecker` with a fixed number
//! of checks in flight at once. Entries are dispatched in store order into a
//! round-robin slot pool; a slot is reaped before reuse, and a final sweep
//! reaps whatever is still running. Workers never touch the store: results
//! come back over per-slot channels and are applied on reap, so no locking
//! is needed.

mod pool;

use crate::checker::BanChecker;
use crate::error::UpdateResult;
use crate::storage::BanStore;
use indicatif::{ProgressBar, ProgressStyle};
use pool::SlotPool;
use std::sync::Arc;

/// Default number of checks kept in flight.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Configuration for an update run.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Number of slots in the check pool. Fixed for the whole run.
    pub concurrency: usize,
    /// Re-check accounts already marked banned.
    pub recheck_banned: bool,
    /// Show a progress bar while checking.
    pub progress: bool,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            recheck_banned: false,
            progress: false,
        }
    }
}

impl UpdateConfig {
    /// Set the number of concurrent checks.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Also re-check accounts already marked banned.
    pub fn with_recheck(mut self, recheck: bool) -> Self {
        self.recheck_banned = recheck;
        self
    }

    /// Enable the progress bar.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

/// Outcome of an update run.
#[derive(Debug, Clone, Default)]
pub struct UpdateSummary {
    /// Number of accounts dispatched for checking.
    pub checked: usize,
    /// Accounts that went from clean to banned during this run.
    pub newly_banned: usize,
    /// Accounts whose ban mark was cleared during this run.
    pub cleared: usize,
    /// Accounts marked banned after the run, over the whole store.
    pub banned: usize,
}

/// Run the verification scheduler over `store`.
///
/// Selects all entries when `recheck_banned` is set, otherwise only entries
/// not currently marked banned, and checks them with at most
/// `config.concurrency` checks in flight. Ban dates are mutated in place per
/// the result-application rule; the caller serializes the store afterwards.
pub async fn run_update<C>(
    store: &mut BanStore,
    checker: Arc<C>,
    config: UpdateConfig,
) -> UpdateResult<UpdateSummary>
where
    C: BanChecker + ?Sized + 'static,
{
    let selection: Vec<usize> = store
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| config.recheck_banned || !e.is_banned())
        .map(|(index, _)| index)
        .collect();

    let was_banned: Vec<bool> = selection
        .iter()
        .map(|&index| store.entries()[index].is_banned())
        .collect();

    let progress = if config.progress && !selection.is_empty() {
        let pb = ProgressBar::new(selection.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut pool = SlotPool::new(config.concurrency.max(1));
    for &index in &selection {
        let account = store.entries()[index].id.clone();
        if pool.dispatch(store, &checker, index, account).await? {
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }
    }

    let drained = pool.drain(store).await?;
    if let Some(pb) = &progress {
        pb.inc(drained as u64);
        pb.finish_with_message("update complete");
    }

    let mut summary = UpdateSummary {
        checked: selection.len(),
        ..UpdateSummary::default()
    };
    for (&index, &before) in selection.iter().zip(&was_banned) {
        match (before, store.entries()[index].is_banned()) {
            (false, true) => summary.newly_banned += 1,
            (true, false) => summary.cleared += 1,
            _ => {}
        }
    }
    summary.banned = store.entries().iter().filter(|e| e.is_banned()).count();

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CheckError, CheckResult};
    use crate::storage::AccountEntry;
    use crate::types::AccountId;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn id(s: &str) -> AccountId {
        AccountId::new(s).unwrap()
    }

    fn entry(account: &str, report: i64, banned: Option<i64>) -> AccountEntry {
        AccountEntry {
            id: id(account),
            report_date: Utc.timestamp_opt(report, 0).single().unwrap(),
            banned_date: banned.map(|s| Utc.timestamp_opt(s, 0).single().unwrap()),
        }
    }

    fn store_of(entries: Vec<AccountEntry>) -> BanStore {
        let mut store = BanStore::new().unwrap();
        for e in entries {
            store.push(e).unwrap();
        }
        store
    }

    /// Answers from a fixed set of banned ids, recording every id checked.
    struct MapChecker {
        banned: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl MapChecker {
        fn new(banned: &[&str]) -> Self {
            Self {
                banned: banned.iter().map(|s| s.to_string()).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BanChecker for MapChecker {
        async fn check(&self, account: &AccountId) -> CheckResult<bool> {
            self.calls.lock().unwrap().push(account.as_str().to_string());
            Ok(self.banned.contains(account.as_str()))
        }
    }

    /// Tracks how many checks run at once.
    struct GaugeChecker {
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    impl GaugeChecker {
        fn new() -> Self {
            Self {
                current: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BanChecker for GaugeChecker {
        async fn check(&self, _account: &AccountId) -> CheckResult<bool> {
            let in_flight = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(in_flight, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            Ok(false)
        }
    }

    /// Fails transport for every id in the set.
    struct FlakyChecker {
        failing: HashSet<String>,
    }

    #[async_trait]
    impl BanChecker for FlakyChecker {
        async fn check(&self, account: &AccountId) -> CheckResult<bool> {
            if self.failing.contains(account.as_str()) {
                // Manufacture a real transport error.
                let err = reqwest::get("http://127.0.0.1:1/").await.unwrap_err();
                return Err(CheckError::Transport(err));
            }
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_in_flight_checks_never_exceed_pool_size() {
        let mut store = store_of((0..12).map(|i| entry(&format!("acc{i}"), 1, None)).collect());
        let checker = Arc::new(GaugeChecker::new());

        let config = UpdateConfig::default().with_concurrency(3);
        let summary = run_update(&mut store, Arc::clone(&checker), config)
            .await
            .unwrap();

        assert_eq!(summary.checked, 12);
        assert!(checker.peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(checker.current.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_banned_entries_skipped_without_recheck() {
        let mut store = store_of(vec![
            entry("banned_one", 1, Some(100)),
            entry("clean_one", 2, None),
        ]);
        let before = store.entries()[0].banned_date;
        let checker = Arc::new(MapChecker::new(&[]));

        let summary = run_update(&mut store, Arc::clone(&checker), UpdateConfig::default())
            .await
            .unwrap();

        assert_eq!(checker.calls(), vec!["clean_one".to_string()]);
        assert_eq!(summary.checked, 1);
        // The skipped entry is untouched, not even re-dated.
        assert_eq!(store.entries()[0].banned_date, before);
    }

    #[tokio::test]
    async fn test_recheck_checks_everything_and_clears_unbanned() {
        let mut store = store_of(vec![
            entry("7", 1, Some(200)),
            entry("clean", 2, None),
        ]);
        let checker = Arc::new(MapChecker::new(&[]));

        let config = UpdateConfig::default().with_recheck(true);
        let summary = run_update(&mut store, Arc::clone(&checker), config)
            .await
            .unwrap();

        assert_eq!(checker.calls().len(), 2);
        assert!(!store.entries()[0].is_banned());
        assert_eq!(summary.cleared, 1);
        assert_eq!(summary.banned, 0);
    }

    #[tokio::test]
    async fn test_fresh_ban_gets_collection_time_and_keeps_report_date() {
        let report = Utc.timestamp_opt(1400000000, 0).single().unwrap();
        let mut store = store_of(vec![entry("42", 1400000000, None)]);
        let checker = Arc::new(MapChecker::new(&["42"]));

        let before_run = Utc::now();
        let summary = run_update(&mut store, checker, UpdateConfig::default())
            .await
            .unwrap();
        let after_run = Utc::now();

        let e = &store.entries()[0];
        assert_eq!(e.report_date, report);
        let banned_date = e.banned_date.unwrap();
        assert!(banned_date >= before_run && banned_date <= after_run);
        assert_eq!(summary.newly_banned, 1);
    }

    #[tokio::test]
    async fn test_repeated_positive_preserves_first_observed_date() {
        let first_observed = Utc.timestamp_opt(1400005000, 0).single().unwrap();
        let mut store = store_of(vec![entry("42", 1400000000, Some(1400005000))]);
        let checker = Arc::new(MapChecker::new(&["42"]));

        let config = UpdateConfig::default().with_recheck(true);
        run_update(&mut store, checker, config).await.unwrap();

        assert_eq!(store.entries()[0].banned_date, Some(first_observed));
    }

    #[tokio::test]
    async fn test_each_slot_result_lands_on_its_own_entry() {
        // More entries than slots, mixed outcomes: exercises the reap done
        // at dispatch time as well as the final sweep.
        let names = ["a", "b", "c", "d", "e", "f", "g"];
        let banned = ["b", "e", "g"];
        let mut store = store_of(names.iter().map(|n| entry(n, 1, None)).collect());
        let checker = Arc::new(MapChecker::new(&banned));

        let config = UpdateConfig::default().with_concurrency(3);
        let summary = run_update(&mut store, checker, config).await.unwrap();

        for e in store.entries() {
            assert_eq!(
                e.is_banned(),
                banned.contains(&e.id.as_str()),
                "wrong status for '{}'",
                e.id
            );
        }
        assert_eq!(summary.newly_banned, 3);
        assert_eq!(summary.banned, 3);
    }

    #[tokio::test]
    async fn test_check_failure_degrades_to_not_banned() {
        let mut store = store_of(vec![
            entry("unreachable", 1, Some(300)),
            entry("fine", 2, None),
        ]);
        let checker = Arc::new(FlakyChecker {
            failing: ["unreachable".to_string()].into_iter().collect(),
        });

        let config = UpdateConfig::default().with_recheck(true);
        let summary = run_update(&mut store, checker, config).await.unwrap();

        // The failed check reads as a negative result and un-bans the entry.
        assert!(!store.entries()[0].is_banned());
        assert!(store.entries()[1].is_banned());
        assert_eq!(summary.cleared, 1);
        assert_eq!(summary.newly_banned, 1);
    }

    #[tokio::test]
    async fn test_empty_store_is_a_noop() {
        let mut store = BanStore::new().unwrap();
        let checker = Arc::new(MapChecker::new(&[]));

        let summary = run_update(&mut store, checker, UpdateConfig::default())
            .await
            .unwrap();

        assert_eq!(summary.checked, 0);
        assert_eq!(summary.banned, 0);
    }
}
