use crate::db::log::{LogEntry, load_log};
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use rusqlite::Connection;
use std::sync::LazyLock;

const MAX_OP_WIDTH: usize = 60;

static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap());

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// ANSI color for each operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "score" => Colour::Green,
        "session_start" => Colour::Cyan,
        "init" => Colour::RGB(255, 153, 51), // orange
        "migration_applied" => Colour::Purple,
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// One display line per entry: `id: date | op (target) => message`.
    pub fn format_entries(entries: &[LogEntry]) -> Vec<String> {
        let op_targets: Vec<String> = entries
            .iter()
            .map(|e| {
                if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                }
            })
            .collect();

        let op_w = op_targets
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);

        entries
            .iter()
            .zip(op_targets)
            .map(|(e, op_target)| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| e.date.clone());

                let visible = if op_target.chars().count() > MAX_OP_WIDTH {
                    let mut s: String = op_target.chars().take(MAX_OP_WIDTH - 3).collect();
                    s.push_str("...");
                    s
                } else {
                    op_target
                };

                // only the operation word is colored
                let color = color_for_operation(&e.operation);
                let colored = match visible.split_once(' ') {
                    Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                    None => color.paint(visible.as_str()).to_string(),
                };

                let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

                format!(
                    "{:>id_w$}: {:<date_w$} | {}{} => {}",
                    e.id,
                    date,
                    colored,
                    padding,
                    e.message,
                    id_w = id_w,
                    date_w = date_w
                )
            })
            .collect()
    }

    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;

        println!("📜 Internal log:\n");

        if entries.is_empty() {
            println!("(empty)");
            return Ok(());
        }

        for line in Self::format_entries(&entries) {
            println!("{line}");
        }

        Ok(())
    }
}
