//! Time utilities: epoch milliseconds, local date keys, parsing and formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

pub fn now_ms() -> i64 {
    Local::now().timestamp_millis()
}

/// Local calendar day as `YYYY-MM-DD`.
pub fn today_key() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

pub fn to_local(ms: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ms).single()
}

/// Accepts `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM` or a bare `HH:MM` (today).
pub fn parse_local(input: &str) -> AppResult<i64> {
    let s = input.trim();

    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_ms(ndt, s);
        }
    }

    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
        let today: NaiveDate = Local::now().date_naive();
        return local_ms(today.and_time(t), s);
    }

    Err(AppError::InvalidDateTime(s.to_string()))
}

fn local_ms(ndt: NaiveDateTime, raw: &str) -> AppResult<i64> {
    Local
        .from_local_datetime(&ndt)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| AppError::InvalidDateTime(raw.to_string()))
}

pub fn format_ms(ms: i64) -> String {
    to_local(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "--".to_string())
}

pub fn format_time_ms(ms: i64) -> String {
    to_local(ms)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
