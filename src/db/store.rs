use crate::db::models::{
    EvaluationInsert, EvaluationRow, EvaluationUpdate, SessionInsert, SessionRow, SessionUpdate,
};
use crate::errors::AppResult;

/// Operations the annotation workflow needs from storage.
///
/// [`EvalClient`](crate::db::client::EvalClient) is the SQLite-backed
/// implementation; logic code takes any `EvaluationStore` so tests can hand
/// in their own.
pub trait EvaluationStore {
    fn insert_evaluation(&mut self, row: EvaluationInsert) -> AppResult<EvaluationRow>;

    /// Fails with `NotFound` when no row has `id`.
    fn update_evaluation(&mut self, id: &str, upd: &EvaluationUpdate) -> AppResult<EvaluationRow>;

    fn get_evaluation(&self, id: &str) -> AppResult<Option<EvaluationRow>>;

    /// Oldest first; `None` lists every user.
    fn list_evaluations(&self, user_id: Option<&str>) -> AppResult<Vec<EvaluationRow>>;

    fn insert_session(&mut self, row: SessionInsert) -> AppResult<SessionRow>;

    /// Fails with `NotFound` when no row has `id`.
    fn update_session(&mut self, id: &str, upd: &SessionUpdate) -> AppResult<SessionRow>;

    fn get_session(&self, id: &str) -> AppResult<Option<SessionRow>>;

    /// Oldest first; `None` lists every user.
    fn list_sessions(&self, user_id: Option<&str>) -> AppResult<Vec<SessionRow>>;

    /// Audit trail entry. Stores without one may ignore it.
    fn log(&mut self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}
