//! JSON documents stored under string keys.
//!
//! Reads never fail the caller: a missing row or a document that no longer
//! parses falls back to the provided default, with a warning for the latter.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub fn read_raw(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
            row.get::<_, String>(0)
        })
        .optional()?;
    Ok(value)
}

pub fn read_json<T: DeserializeOwned>(conn: &Connection, key: &str, fallback: T) -> AppResult<T> {
    let Some(raw) = read_raw(conn, key)? else {
        return Ok(fallback);
    };
    if raw.trim().is_empty() {
        return Ok(fallback);
    }
    match serde_json::from_str(&raw) {
        Ok(v) => Ok(v),
        Err(e) => {
            warning(format!("Failed to read '{}' from store: {}", key, e));
            Ok(fallback)
        }
    }
}

pub fn write_json<T: Serialize + ?Sized>(conn: &Connection, key: &str, value: &T) -> AppResult<()> {
    let json = serde_json::to_string(value)?;
    let mut stmt = conn.prepare_cached(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )?;
    stmt.execute(params![key, json, Local::now().to_rfc3339()])?;
    Ok(())
}

pub fn remove(conn: &Connection, key: &str) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
    Ok(n > 0)
}

/// `(key, size in bytes, updated_at)` for every stored document.
pub fn list_keys(conn: &Connection) -> AppResult<Vec<(String, usize, String)>> {
    let mut stmt =
        conn.prepare("SELECT key, length(value), updated_at FROM kv ORDER BY key ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i64>(1)? as usize,
            row.get::<_, String>(2)?,
        ))
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
