use crate::db::client::EvalClient;
use crate::db::migrate::schema_version;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::{Connection, OptionalExtension};

/// Counters shown by `db --info`.
#[derive(Debug, Clone, PartialEq)]
pub struct DbStats {
    pub schema_version: i64,
    pub evaluations: i64,
    pub sessions: i64,
    pub completed_sessions: i64,
    pub annotators: i64,
    pub first_evaluation: Option<String>,
    pub last_evaluation: Option<String>,
}

fn count(conn: &Connection, sql: &str) -> AppResult<i64> {
    Ok(conn.query_row(sql, [], |row| row.get(0))?)
}

pub fn collect_stats(conn: &Connection) -> AppResult<DbStats> {
    let first_evaluation: Option<String> = conn
        .query_row(
            "SELECT created_at FROM evaluations ORDER BY created_at ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_evaluation: Option<String> = conn
        .query_row(
            "SELECT created_at FROM evaluations ORDER BY created_at DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(DbStats {
        schema_version: schema_version(conn)?,
        evaluations: count(conn, "SELECT COUNT(*) FROM evaluations")?,
        sessions: count(conn, "SELECT COUNT(*) FROM evaluation_sessions")?,
        completed_sessions: count(
            conn,
            "SELECT COUNT(*) FROM evaluation_sessions WHERE completed_pairs >= total_pairs",
        )?,
        annotators: count(conn, "SELECT COUNT(DISTINCT user_id) FROM evaluations")?,
        first_evaluation,
        last_evaluation,
    })
}

pub fn print_db_info(client: &EvalClient) -> AppResult<()> {
    let stats = collect_stats(client.conn())?;

    println!();
    println!(
        "{}• Endpoint:{} {}{}{}",
        CYAN,
        RESET,
        YELLOW,
        client.endpoint(),
        RESET
    );
    println!("{}• Schema version:{} {}", CYAN, RESET, stats.schema_version);
    println!(
        "{}• Evaluations:{} {}{}{} ({} annotators)",
        CYAN, RESET, GREEN, stats.evaluations, RESET, stats.annotators
    );
    println!(
        "{}• Sessions:{} {}{}{} ({} completed)",
        CYAN, RESET, GREEN, stats.sessions, RESET, stats.completed_sessions
    );

    let fmt_first = stats
        .first_evaluation
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = stats
        .last_evaluation
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Evaluation range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);
    println!();

    Ok(())
}
