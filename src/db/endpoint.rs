//! Database endpoint strings → something SQLite can open.

use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Memory,
    File(PathBuf),
}

impl Endpoint {
    /// Accepts `:memory:`, `sqlite::memory:`, `sqlite://<path>`,
    /// `file:<path>` or a plain path (`~/` expanded).
    pub fn parse(raw: &str) -> AppResult<Self> {
        let s = raw.trim();

        if s.is_empty() {
            return Err(AppError::UnsupportedEndpoint("<empty>".into()));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Err(AppError::UnsupportedEndpoint(format!(
                "{s} (only local SQLite databases are supported)"
            )));
        }
        if s == ":memory:" || s == "sqlite::memory:" {
            return Ok(Endpoint::Memory);
        }

        let path = s
            .strip_prefix("sqlite://")
            .or_else(|| s.strip_prefix("file:"))
            .unwrap_or(s);

        Ok(Endpoint::File(expand_tilde(path)))
    }
}
