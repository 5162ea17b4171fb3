//! Running/active/blocked derivation from the host's process list.

use crate::core::matching::find_pid_for_account;
use crate::errors::AppResult;
use crate::host::NativeHost;
use crate::models::account::{Account, AccountStatus};
use crate::models::process::TelegramProcess;
use crate::store::Store;
use crate::utils::time::now_ms;
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub account: Account,
    pub pid: Option<u32>,
    pub effective_status: AccountStatus,
}

impl AccountView {
    pub fn is_running(&self) -> bool {
        self.pid.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccountStats {
    pub total: usize,
    pub running: usize,
    pub active: usize,
    pub blocked: usize,
}

/// Blocked is sticky; otherwise running means active.
pub fn effective_status(stored: AccountStatus, running: bool) -> AccountStatus {
    match (stored, running) {
        (AccountStatus::Blocked, _) => AccountStatus::Blocked,
        (_, true) => AccountStatus::Active,
        (_, false) => AccountStatus::Inactive,
    }
}

/// Pairs accounts with processes in account order; a pid is claimed once.
pub fn reconcile(accounts: &[Account], processes: &[TelegramProcess]) -> Vec<AccountView> {
    let mut used: HashSet<u32> = HashSet::new();
    accounts
        .iter()
        .map(|account| {
            let pid = find_pid_for_account(account, processes, &used);
            if let Some(p) = pid {
                used.insert(p);
            }
            AccountView {
                account: account.clone(),
                pid,
                effective_status: effective_status(account.status, pid.is_some()),
            }
        })
        .collect()
}

pub fn account_stats(views: &[AccountView]) -> AccountStats {
    views.iter().fold(AccountStats::default(), |mut s, v| {
        s.total += 1;
        if v.is_running() {
            s.running += 1;
        }
        match v.effective_status {
            AccountStatus::Active => s.active += 1,
            AccountStatus::Blocked => s.blocked += 1,
            AccountStatus::Inactive => {}
        }
        s
    })
}

/// Persist derived statuses; stamps `lastActive` on running accounts.
/// Returns how many accounts changed.
pub fn apply_effective_statuses(store: &Store, views: &[AccountView]) -> AppResult<usize> {
    let mut accounts = store.accounts()?;
    let now = now_ms();
    let mut changed = 0;

    for account in accounts.iter_mut() {
        let Some(view) = views.iter().find(|v| v.account.id == account.id) else {
            continue;
        };
        let mut touched = false;
        if account.status != AccountStatus::Blocked && account.status != view.effective_status {
            account.status = view.effective_status;
            touched = true;
        }
        if view.is_running() {
            account.last_active = Some(now);
            touched = true;
        }
        if touched {
            changed += 1;
        }
    }

    if changed > 0 {
        store.save_accounts(&accounts)?;
    }
    Ok(changed)
}

/// Fixed-interval poller that doubles its delay after each failure, up to a
/// ceiling, and snaps back on the first success.
#[derive(Debug, Clone)]
pub struct StatusPoller {
    base: Duration,
    max: Duration,
    current: Duration,
    failures: u32,
}

impl StatusPoller {
    pub fn new(base: Duration, max: Duration) -> Self {
        let base = base.max(Duration::from_millis(1));
        Self {
            base,
            max: max.max(base),
            current: base,
            failures: 0,
        }
    }

    pub fn next_delay(&self) -> Duration {
        self.current
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn record_success(&mut self) {
        self.failures = 0;
        self.current = self.base;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
        self.current = self.current.saturating_mul(2).min(self.max);
    }

    /// One poll: list processes, reconcile against the stored accounts.
    pub fn poll_once<H: NativeHost>(
        &mut self,
        store: &Store,
        host: &H,
    ) -> AppResult<Vec<AccountView>> {
        let result = host
            .list_processes()
            .and_then(|processes| Ok(reconcile(&store.accounts()?, &processes)));
        match &result {
            Ok(_) => self.record_success(),
            Err(_) => self.record_failure(),
        }
        result
    }
}
