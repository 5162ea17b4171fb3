use super::Store;
use crate::errors::AppResult;
use crate::models::account::{Account, AccountStatus};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_accounts: usize,
    pub live_accounts: usize,
    pub blocked_accounts: usize,
    pub live_percent: u32,
}

impl Stats {
    pub fn from_accounts(accounts: &[Account]) -> Self {
        let total = accounts.len();
        let live = accounts
            .iter()
            .filter(|a| a.status == AccountStatus::Active)
            .count();
        let blocked = accounts
            .iter()
            .filter(|a| a.status == AccountStatus::Blocked)
            .count();
        let live_percent = if total > 0 {
            ((live as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };
        Self {
            total_accounts: total,
            live_accounts: live,
            blocked_accounts: blocked,
            live_percent,
        }
    }
}

impl Store {
    pub fn stats(&self) -> AppResult<Stats> {
        Ok(Stats::from_accounts(&self.accounts()?))
    }
}
