//! SQL for the annotation tables.

use crate::db::models::{
    EVALUATION_SESSIONS, EVALUATIONS, EvaluationRow, EvaluationUpdate, SessionRow, SessionUpdate,
};
use crate::errors::{AppError, AppResult};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params, params_from_iter};

const EVALUATION_COLUMNS: &str = "id, image_id, model_name, user_id, score, checks, xs, \
     missed_interactions, created_at, image_url, original_contacts, model_contacts, \
     model_raw_response";

const SESSION_COLUMNS: &str =
    "id, user_id, total_pairs, completed_pairs, created_at, updated_at";

fn contacts_from_column(row: &Row, idx: usize) -> Result<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn contacts_to_column(contacts: &[String]) -> AppResult<String> {
    Ok(serde_json::to_string(contacts)?)
}

pub fn map_evaluation_row(row: &Row) -> Result<EvaluationRow> {
    Ok(EvaluationRow {
        id: row.get(0)?,
        image_id: row.get(1)?,
        model_name: row.get(2)?,
        user_id: row.get(3)?,
        score: row.get(4)?,
        checks: row.get(5)?,
        xs: row.get(6)?,
        missed_interactions: row.get(7)?,
        created_at: row.get(8)?,
        image_url: row.get(9)?,
        original_contacts: contacts_from_column(row, 10)?,
        model_contacts: contacts_from_column(row, 11)?,
        model_raw_response: row.get(12)?,
    })
}

pub fn map_session_row(row: &Row) -> Result<SessionRow> {
    Ok(SessionRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        total_pairs: row.get(2)?,
        completed_pairs: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Columns and values of a partial UPDATE, in matching order.
#[derive(Default)]
struct SetClause {
    columns: Vec<&'static str>,
    values: Vec<Box<dyn ToSql>>,
}

impl SetClause {
    fn push<T: ToSql + 'static>(&mut self, column: &'static str, value: Option<T>) {
        if let Some(v) = value {
            self.columns.push(column);
            self.values.push(Box::new(v));
        }
    }

    fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Run `UPDATE <table> SET ... WHERE id = ?` and return the affected rows.
    fn execute(self, conn: &Connection, table: &str, id: &str) -> AppResult<usize> {
        let assignments: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{col} = ?{}", i + 1))
            .collect();

        let sql = format!(
            "UPDATE {table} SET {} WHERE id = ?{}",
            assignments.join(", "),
            self.columns.len() + 1
        );

        let mut values = self.values;
        values.push(Box::new(id.to_string()));

        Ok(conn.execute(&sql, params_from_iter(values.iter()))?)
    }
}

// ---------------------------
// evaluations
// ---------------------------

pub fn insert_evaluation(conn: &Connection, row: &EvaluationRow) -> AppResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO {EVALUATIONS} ({EVALUATION_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
        ),
        params![
            row.id,
            row.image_id,
            row.model_name,
            row.user_id,
            row.score,
            row.checks,
            row.xs,
            row.missed_interactions,
            row.created_at,
            row.image_url,
            contacts_to_column(&row.original_contacts)?,
            contacts_to_column(&row.model_contacts)?,
            row.model_raw_response,
        ],
    )?;
    Ok(())
}

/// Apply a partial update. Returns the number of rows touched (0 or 1).
pub fn update_evaluation(conn: &Connection, id: &str, upd: &EvaluationUpdate) -> AppResult<usize> {
    let mut set = SetClause::default();
    set.push("id", upd.id.clone());
    set.push("image_id", upd.image_id.clone());
    set.push("model_name", upd.model_name.clone());
    set.push("user_id", upd.user_id.clone());
    set.push("score", upd.score);
    set.push("checks", upd.checks);
    set.push("xs", upd.xs);
    set.push("missed_interactions", upd.missed_interactions);
    set.push("created_at", upd.created_at.clone());
    set.push("image_url", upd.image_url.clone());
    set.push(
        "original_contacts",
        upd.original_contacts
            .as_deref()
            .map(contacts_to_column)
            .transpose()?,
    );
    set.push(
        "model_contacts",
        upd.model_contacts
            .as_deref()
            .map(contacts_to_column)
            .transpose()?,
    );
    set.push("model_raw_response", upd.model_raw_response.clone());

    if set.is_empty() {
        return Ok(0);
    }
    set.execute(conn, EVALUATIONS, id)
}

pub fn load_evaluation(conn: &Connection, id: &str) -> AppResult<Option<EvaluationRow>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVALUATION_COLUMNS} FROM {EVALUATIONS} WHERE id = ?1"
    ))?;
    Ok(stmt.query_row([id], map_evaluation_row).optional()?)
}

pub fn load_evaluations(conn: &Connection, user_id: Option<&str>) -> AppResult<Vec<EvaluationRow>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVALUATION_COLUMNS} FROM {EVALUATIONS}
         WHERE (?1 IS NULL OR user_id = ?1)
         ORDER BY created_at ASC, rowid ASC"
    ))?;

    let rows = stmt.query_map([user_id], map_evaluation_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// evaluation_sessions
// ---------------------------

pub fn insert_session(conn: &Connection, row: &SessionRow) -> AppResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO {EVALUATION_SESSIONS} ({SESSION_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
        ),
        params![
            row.id,
            row.user_id,
            row.total_pairs,
            row.completed_pairs,
            row.created_at,
            row.updated_at,
        ],
    )?;
    Ok(())
}

/// Apply a partial update; `now` is written to `updated_at` unless the
/// update carries its own value.
pub fn update_session(
    conn: &Connection,
    id: &str,
    upd: &SessionUpdate,
    now: &str,
) -> AppResult<usize> {
    let mut set = SetClause::default();
    set.push("id", upd.id.clone());
    set.push("user_id", upd.user_id.clone());
    set.push("total_pairs", upd.total_pairs);
    set.push("completed_pairs", upd.completed_pairs);
    set.push("created_at", upd.created_at.clone());
    set.push(
        "updated_at",
        Some(upd.updated_at.clone().unwrap_or_else(|| now.to_string())),
    );

    set.execute(conn, EVALUATION_SESSIONS, id)
}

pub fn load_session(conn: &Connection, id: &str) -> AppResult<Option<SessionRow>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {SESSION_COLUMNS} FROM {EVALUATION_SESSIONS} WHERE id = ?1"
    ))?;
    Ok(stmt.query_row([id], map_session_row).optional()?)
}

pub fn load_sessions(conn: &Connection, user_id: Option<&str>) -> AppResult<Vec<SessionRow>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {SESSION_COLUMNS} FROM {EVALUATION_SESSIONS}
         WHERE (?1 IS NULL OR user_id = ?1)
         ORDER BY created_at ASC, rowid ASC"
    ))?;

    let rows = stmt.query_map([user_id], map_session_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub(crate) fn not_found(table: &'static str, id: &str) -> AppError {
    AppError::NotFound {
        table,
        id: id.to_string(),
    }
}
