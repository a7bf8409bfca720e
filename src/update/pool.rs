//! Bounded slot pool for in-flight checks.
//!
//! A slot holds at most one running task together with the oneshot receiver
//! that task reports on and the task's own join handle. A slot is always
//! reaped before it is reused, which is what bounds the pool to its
//! configured size.

use crate::checker::BanChecker;
use crate::error::{UpdateError, UpdateResult};
use crate::storage::{AccountEntry, BanStore};
use crate::types::AccountId;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::warn;

/// One dispatched check: the entry it belongs to, the channel it reports on,
/// and its own join handle.
struct SlotTask {
    entry_index: usize,
    account: AccountId,
    rx: oneshot::Receiver<bool>,
    handle: JoinHandle<()>,
}

/// Fixed-size pool of check slots, filled round-robin.
pub(super) struct SlotPool {
    slots: Vec<Option<SlotTask>>,
    cursor: usize,
}

impl SlotPool {
    /// Create a pool with `size` slots, all idle. `size` must be non-zero.
    pub(super) fn new(size: usize) -> Self {
        let mut slots = Vec::with_capacity(size);
        slots.resize_with(size, || None);
        Self { slots, cursor: 0 }
    }

    /// Dispatch a check for the entry at `entry_index` into the next slot.
    ///
    /// If the slot still holds a previous task, that task is reaped first
    /// and its result written to its entry; this is the only point where
    /// dispatch blocks. Spawning the new task returns immediately. Returns
    /// whether a previous task was reaped, so the caller can tick its
    /// progress.
    pub(super) async fn dispatch<C>(
        &mut self,
        store: &mut BanStore,
        checker: &Arc<C>,
        entry_index: usize,
        account: AccountId,
    ) -> UpdateResult<bool>
    where
        C: BanChecker + ?Sized + 'static,
    {
        let reaped = match self.slots[self.cursor].take() {
            Some(task) => {
                reap(task, store).await?;
                true
            }
            None => false,
        };

        let (tx, rx) = oneshot::channel();
        let checker = Arc::clone(checker);
        let task_account = account.clone();
        let handle = tokio::spawn(async move {
            let banned = match checker.check(&task_account).await {
                Ok(banned) => banned,
                Err(err) => {
                    // The stored state cannot distinguish "verified clean"
                    // from "could not verify".
                    warn!(
                        account = %task_account,
                        error = %err,
                        "check failed, treating as not banned"
                    );
                    false
                }
            };
            let _ = tx.send(banned);
        });

        self.slots[self.cursor] = Some(SlotTask {
            entry_index,
            account,
            rx,
            handle,
        });
        self.cursor = (self.cursor + 1) % self.slots.len();

        Ok(reaped)
    }

    /// Reap every slot still holding a task, in slot order, each through its
    /// own receiver and handle. Returns the number of tasks reaped.
    pub(super) async fn drain(&mut self, store: &mut BanStore) -> UpdateResult<usize> {
        let mut reaped = 0;
        for slot in &mut self.slots {
            if let Some(task) = slot.take() {
                reap(task, store).await?;
                reaped += 1;
            }
        }
        Ok(reaped)
    }
}

/// Wait for a task's boolean, join the task, and write the result into the
/// task's own entry.
async fn reap(task: SlotTask, store: &mut BanStore) -> UpdateResult<()> {
    let SlotTask {
        entry_index,
        account,
        rx,
        handle,
    } = task;

    let banned = rx.await.map_err(|_| UpdateError::ResultChannelClosed {
        account: account.clone(),
    })?;
    handle
        .await
        .map_err(|_| UpdateError::WorkerPanicked { account })?;

    if let Some(entry) = store.entry_mut(entry_index) {
        apply_result(entry, banned);
    }
    Ok(())
}

/// Write one check result into an entry.
///
/// A positive result keeps the earliest observed ban date; a negative result
/// clears the ban date unconditionally, treating the remote answer as ground
/// truth. The asymmetry is deliberate product behavior.
pub(super) fn apply_result(entry: &mut AccountEntry, banned: bool) {
    if banned {
        if entry.banned_date.is_none() {
            entry.banned_date = Some(Utc::now());
        }
    } else {
        entry.banned_date = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(account: &str, banned: Option<i64>) -> AccountEntry {
        AccountEntry {
            id: AccountId::new(account).unwrap(),
            report_date: Utc.timestamp_opt(1400000000, 0).single().unwrap(),
            banned_date: banned.map(|s| Utc.timestamp_opt(s, 0).single().unwrap()),
        }
    }

    #[test]
    fn test_positive_result_sets_ban_date_once() {
        let mut e = entry("42", None);
        apply_result(&mut e, true);
        assert!(e.is_banned());

        let first_observed = e.banned_date;
        apply_result(&mut e, true);
        assert_eq!(e.banned_date, first_observed);
    }

    #[test]
    fn test_negative_result_clears_ban_date() {
        let mut e = entry("7", Some(1400005000));
        apply_result(&mut e, false);
        assert!(!e.is_banned());
    }
}
