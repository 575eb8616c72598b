//! SQLite-backed client for the annotation tables.
//!
//! The client is built explicitly from a [`ClientConfig`] and handed to
//! whatever needs storage; nothing in the crate holds a global instance.

use crate::config::{ACCESS_KEY_VAR, Config, ENDPOINT_VAR};
use crate::db::endpoint::Endpoint;
use crate::db::log::ttlog;
use crate::db::migrate::run_pending_migrations;
use crate::db::models::{
    EVALUATION_SESSIONS, EVALUATIONS, EvaluationInsert, EvaluationRow, EvaluationUpdate,
    SessionInsert, SessionRow, SessionUpdate,
};
use crate::db::queries;
use crate::db::store::EvaluationStore;
use crate::errors::{AppError, AppResult};
use chrono::{SecondsFormat, Utc};
use rusqlite::Connection;
use std::env;
use uuid::Uuid;

/// Where the database lives and the public key the client presents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub access_key: String,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.database.clone(), cfg.access_key.clone())
    }

    /// Read both settings from the environment. The endpoint is required,
    /// the access key defaults to empty.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENDPOINT_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Config(format!("{ENDPOINT_VAR} is not set")))?;
        let access_key = lookup(ACCESS_KEY_VAR).unwrap_or_default();
        Ok(Self::new(endpoint, access_key))
    }
}

pub struct EvalClient {
    conn: Connection,
    config: ClientConfig,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl EvalClient {
    /// Open the database behind `config.endpoint` and bring its schema up to date.
    pub fn connect(config: ClientConfig) -> AppResult<Self> {
        let conn = match Endpoint::parse(&config.endpoint)? {
            Endpoint::Memory => Connection::open_in_memory()?,
            Endpoint::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                Connection::open(&path)?
            }
        };

        run_pending_migrations(&conn)?;

        Ok(Self { conn, config })
    }

    /// Throwaway in-memory database, mostly for tests.
    pub fn in_memory() -> AppResult<Self> {
        Self::connect(ClientConfig::new(":memory:", ""))
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn access_key(&self) -> &str {
        &self.config.access_key
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl EvaluationStore for EvalClient {
    fn insert_evaluation(&mut self, row: EvaluationInsert) -> AppResult<EvaluationRow> {
        let row = row.into_row(Uuid::new_v4().to_string(), now());
        queries::insert_evaluation(&self.conn, &row)?;
        Ok(row)
    }

    fn update_evaluation(&mut self, id: &str, upd: &EvaluationUpdate) -> AppResult<EvaluationRow> {
        if upd.is_empty() {
            return self
                .get_evaluation(id)?
                .ok_or_else(|| queries::not_found(EVALUATIONS, id));
        }

        if queries::update_evaluation(&self.conn, id, upd)? == 0 {
            return Err(queries::not_found(EVALUATIONS, id));
        }

        let new_id = upd.id.as_deref().unwrap_or(id);
        self.get_evaluation(new_id)?
            .ok_or_else(|| queries::not_found(EVALUATIONS, new_id))
    }

    fn get_evaluation(&self, id: &str) -> AppResult<Option<EvaluationRow>> {
        queries::load_evaluation(&self.conn, id)
    }

    fn list_evaluations(&self, user_id: Option<&str>) -> AppResult<Vec<EvaluationRow>> {
        queries::load_evaluations(&self.conn, user_id)
    }

    fn insert_session(&mut self, row: SessionInsert) -> AppResult<SessionRow> {
        let row = row.into_row(Uuid::new_v4().to_string(), now());
        queries::insert_session(&self.conn, &row)?;
        Ok(row)
    }

    fn update_session(&mut self, id: &str, upd: &SessionUpdate) -> AppResult<SessionRow> {
        if queries::update_session(&self.conn, id, upd, &now())? == 0 {
            return Err(queries::not_found(EVALUATION_SESSIONS, id));
        }

        let new_id = upd.id.as_deref().unwrap_or(id);
        self.get_session(new_id)?
            .ok_or_else(|| queries::not_found(EVALUATION_SESSIONS, new_id))
    }

    fn get_session(&self, id: &str) -> AppResult<Option<SessionRow>> {
        queries::load_session(&self.conn, id)
    }

    fn list_sessions(&self, user_id: Option<&str>) -> AppResult<Vec<SessionRow>> {
        queries::load_sessions(&self.conn, user_id)
    }

    fn log(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.conn, operation, target, message)
    }
}
