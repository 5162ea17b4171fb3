pub mod account;
pub mod auth;
pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod hashtag;
pub mod init;
pub mod launch;
pub mod log;
pub mod processes;
pub mod project;
pub mod settings;
pub mod stats;
pub mod task;
pub mod watch;

use crate::config::Config;
use crate::errors::AppResult;
use crate::store::Store;

/// Open the configured database and apply the daily reset.
pub(crate) fn open_store(cfg: &Config) -> AppResult<Store> {
    let store = Store::open(&cfg.database)?;
    store.ensure_daily_reset()?;
    Ok(store)
}

/// Pretty JSON on stdout, for `--json` flags.
pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
