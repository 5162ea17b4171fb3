use crate::ui::messages::success;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result};

/// A schema step, identified by a sortable version string.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250110_0001_create_kv",
        description: "Create key-value document table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS kv (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250402_0002_kv_updated_index",
        description: "Index documents by last update",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_kv_updated_at ON kv(updated_at);
        "#,
    },
];

/// Ensure that the bookkeeping table exists.
fn ensure_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS migrations (
            version     TEXT PRIMARY KEY,
            applied_at  TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare("SELECT 1 FROM migrations WHERE version = ?1 LIMIT 1")?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already recorded, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_migrations_table(conn)?;
    let mut stmt = conn.prepare("SELECT version FROM migrations ORDER BY version ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db(). Returns how many steps were applied.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_migrations_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(m.sql)?;
        tx.execute(
            "INSERT INTO migrations (version, applied_at, description) VALUES (?1, ?2, ?3)",
            (m.version, Local::now().to_rfc3339(), m.description),
        )?;
        tx.commit()?;

        success(format!("Migration applied: {} → {}", m.version, m.description));
        applied += 1;
    }

    Ok(applied)
}
