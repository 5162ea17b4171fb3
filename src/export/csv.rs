use crate::errors::AppResult;
use crate::models::account::Account;
use crate::models::log_entry::LogEntry;
use crate::utils::time::format_ms;
use csv::Writer;
use std::path::Path;

/// Hashtags are joined with spaces, each prefixed with `#`.
pub fn write_accounts(path: &Path, accounts: &[Account]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(["id", "name", "display_name", "status", "hashtags", "notes", "last_active"])?;

    for a in accounts {
        let tags = a
            .hashtags
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ");
        wtr.write_record([
            a.id.to_string(),
            a.name.clone(),
            a.display_name.clone().unwrap_or_default(),
            a.status.as_str().to_string(),
            tags,
            a.notes.clone().unwrap_or_default(),
            a.last_active.map(format_ms).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_logs(path: &Path, logs: &[LogEntry]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(["id", "timestamp", "message"])?;
    for l in logs {
        wtr.write_record([l.id.to_string(), format_ms(l.timestamp), l.message.clone()])?;
    }

    wtr.flush()?;
    Ok(())
}
