//! Schema migrations, tracked through `PRAGMA user_version`.

use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Latest schema version known to this build.
pub const SCHEMA_VERSION: i64 = 2;

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

/// v1: the two annotation tables.
fn create_evaluation_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS evaluations (
            id                  TEXT PRIMARY KEY,
            image_id            TEXT NOT NULL,
            model_name          TEXT NOT NULL,
            user_id             TEXT NOT NULL,
            score               REAL,
            checks              INTEGER,
            xs                  INTEGER,
            missed_interactions INTEGER,
            created_at          TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            image_url           TEXT NOT NULL,
            original_contacts   TEXT NOT NULL DEFAULT '[]',
            model_contacts      TEXT NOT NULL DEFAULT '[]',
            model_raw_response  TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS evaluation_sessions (
            id              TEXT PRIMARY KEY,
            user_id         TEXT NOT NULL,
            total_pairs     INTEGER NOT NULL,
            completed_pairs INTEGER NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        "#,
    )
}

/// v2: lookups by annotator.
fn create_user_indexes(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_evaluations_user ON evaluations(user_id, created_at);
        CREATE INDEX IF NOT EXISTS idx_sessions_user ON evaluation_sessions(user_id, created_at);
        "#,
    )
}

pub fn schema_version(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Bring the schema up to [`SCHEMA_VERSION`]. Safe to call on every open.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let current = schema_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(AppError::Migration(format!(
            "database schema v{current} is newer than this build (v{SCHEMA_VERSION})"
        )));
    }

    let steps: [(i64, fn(&Connection) -> rusqlite::Result<()>); 2] =
        [(1, create_evaluation_tables), (2, create_user_indexes)];

    for (version, step) in steps {
        if version <= current {
            continue;
        }

        step(conn).map_err(|e| AppError::Migration(format!("v{version}: {e}")))?;
        conn.execute_batch(&format!("PRAGMA user_version = {version};"))?;

        ttlog(
            conn,
            "migration_applied",
            &format!("v{version}"),
            &format!("Schema upgraded to v{version}"),
        )?;
    }

    Ok(())
}
