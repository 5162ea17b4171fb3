use super::{Store, keys};
use crate::errors::AppResult;
use crate::models::log_entry::LogEntry;
use crate::models::next_id;
use crate::utils::time::now_ms;

/// Entries older than this are dropped on read.
pub const LOG_RETENTION_MS: i64 = 24 * 60 * 60 * 1000;
pub const LOG_CAPACITY: usize = 200;

fn retain_recent(mut logs: Vec<LogEntry>, now: i64) -> Vec<LogEntry> {
    let cutoff = now - LOG_RETENTION_MS;
    logs.retain(|l| l.timestamp >= cutoff);
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    logs.truncate(LOG_CAPACITY);
    logs
}

impl Store {
    /// Newest first, last 24 hours, at most 200 entries.
    pub fn logs(&self) -> AppResult<Vec<LogEntry>> {
        self.ensure_daily_reset()?;
        let stored: Vec<LogEntry> = self.read_list(keys::LOGS)?;
        let before = stored.len();
        let filtered = retain_recent(stored, now_ms());
        if filtered.len() != before {
            self.save_logs(&filtered)?;
        }
        Ok(filtered)
    }

    pub fn save_logs(&self, logs: &[LogEntry]) -> AppResult<()> {
        self.write(keys::LOGS, logs)
    }

    pub fn add_log(&self, message: &str) -> AppResult<LogEntry> {
        let mut logs = self.logs()?;
        let created = LogEntry {
            id: next_id(logs.iter().map(|l| l.id)),
            message: message.trim().to_string(),
            timestamp: now_ms(),
        };
        logs.insert(0, created.clone());
        self.save_logs(&retain_recent(logs, created.timestamp))?;
        Ok(created)
    }
}
