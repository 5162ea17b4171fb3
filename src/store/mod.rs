//! Typed accessors over the key-value document table.
//!
//! Every entity list lives as one JSON document under a fixed key; writes
//! replace the whole document. There is no cross-key transaction.

mod accounts;
mod launch;
mod logs;
mod projects;
mod settings;
mod stats;
mod tasks;

pub use stats::Stats;

use crate::db::initialize::init_db;
use crate::db::kv;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::task::DailyTask;
use crate::utils::time::today_key;
use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub mod keys {
    pub const PROJECTS: &str = "projects";
    pub const ACCOUNTS: &str = "accounts";
    pub const ACCOUNT_META: &str = "accountMeta";
    pub const DAILY_TASKS: &str = "dailyTasks";
    pub const LOGS: &str = "logs";
    pub const DAILY_RESET_DATE: &str = "dailyResetDate";
    pub const HASHTAG_META: &str = "hashtagMeta";
    pub const SETTINGS: &str = "settings";
    pub const TELEGRAM_LAUNCH: &str = "telegramLaunch";
    pub const AUTH_USER: &str = "authUser";
    pub const AUTH_ONBOARDING_SEEN: &str = "authOnboardingSeen";
}

pub struct Store {
    pool: DbPool,
}

impl Store {
    /// Open (and migrate) the database at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    pub fn pool_mut(&mut self) -> &mut DbPool {
        &mut self.pool
    }

    pub(crate) fn read<T: DeserializeOwned>(&self, key: &str, fallback: T) -> AppResult<T> {
        kv::read_json(self.conn(), key, fallback)
    }

    pub(crate) fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        kv::write_json(self.conn(), key, value)
    }

    /// Lists tolerate individual bad records: those are skipped, not fatal.
    pub(crate) fn read_list<T: DeserializeOwned>(&self, key: &str) -> AppResult<Vec<T>> {
        let raw: Vec<serde_json::Value> = self.read(key, Vec::new())?;
        Ok(raw
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect())
    }

    /// On the first access of a new local day, uncheck every daily task and
    /// clear the activity log.
    pub fn ensure_daily_reset(&self) -> AppResult<()> {
        self.ensure_daily_reset_for(&today_key())
    }

    pub fn ensure_daily_reset_for(&self, today: &str) -> AppResult<()> {
        let last: String = self.read(keys::DAILY_RESET_DATE, String::new())?;
        if last == today {
            return Ok(());
        }

        let tasks: Vec<DailyTask> = self.read_list(keys::DAILY_TASKS)?;
        let reset: Vec<DailyTask> = tasks
            .into_iter()
            .map(|t| DailyTask {
                is_completed: false,
                ..t
            })
            .collect();
        self.write(keys::DAILY_TASKS, &reset)?;
        self.write(keys::LOGS, &Vec::<serde_json::Value>::new())?;
        self.write(keys::DAILY_RESET_DATE, today)?;
        Ok(())
    }
}
