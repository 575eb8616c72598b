//! Row shapes for the `evaluations` and `evaluation_sessions` tables.
//!
//! Each table has three shapes: the full `Row` as read back, an `Insert`
//! whose optional fields are filled by the client (id, timestamps, counters),
//! and an `Update` where every field is optional and only the `Some` ones are
//! written.

use crate::models::EvaluationPair;
use serde::{Deserialize, Serialize};

pub const EVALUATIONS: &str = "evaluations";
pub const EVALUATION_SESSIONS: &str = "evaluation_sessions";

// ---------------------------
// evaluations
// ---------------------------

/// A row from the `evaluations` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRow {
    pub id: String,
    pub image_id: String,
    pub model_name: String,
    pub user_id: String,
    pub score: Option<f64>,
    pub checks: Option<i64>,
    pub xs: Option<i64>,
    pub missed_interactions: Option<i64>,
    pub created_at: String,
    pub image_url: String,
    pub original_contacts: Vec<String>,
    pub model_contacts: Vec<String>,
    pub model_raw_response: String,
}

/// Shape for inserting an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInsert {
    pub id: Option<String>,
    pub image_id: String,
    pub model_name: String,
    pub user_id: String,
    pub score: Option<f64>,
    pub checks: Option<i64>,
    pub xs: Option<i64>,
    pub missed_interactions: Option<i64>,
    pub created_at: Option<String>,
    pub image_url: String,
    pub original_contacts: Vec<String>,
    pub model_contacts: Vec<String>,
    pub model_raw_response: String,
}

impl EvaluationInsert {
    /// Copy the pair being judged; all scoring fields start empty.
    pub fn from_pair(pair: &EvaluationPair, user_id: &str) -> Self {
        Self {
            id: None,
            image_id: pair.image_id.clone(),
            model_name: pair.model_name.as_str().to_string(),
            user_id: user_id.to_string(),
            score: None,
            checks: None,
            xs: None,
            missed_interactions: None,
            created_at: None,
            image_url: pair.image_url.clone(),
            original_contacts: pair.original_contacts.clone(),
            model_contacts: pair.model_contacts.clone(),
            model_raw_response: pair.model_raw_response.clone(),
        }
    }

    pub fn with_score(mut self, score: Option<f64>) -> Self {
        self.score = score;
        self
    }

    pub fn with_checks(mut self, checks: Option<i64>) -> Self {
        self.checks = checks;
        self
    }

    pub fn with_xs(mut self, xs: Option<i64>) -> Self {
        self.xs = xs;
        self
    }

    pub fn with_missed_interactions(mut self, missed: Option<i64>) -> Self {
        self.missed_interactions = missed;
        self
    }

    /// Resolve defaults into a full row.
    pub(crate) fn into_row(self, default_id: String, now: String) -> EvaluationRow {
        EvaluationRow {
            id: self.id.unwrap_or(default_id),
            image_id: self.image_id,
            model_name: self.model_name,
            user_id: self.user_id,
            score: self.score,
            checks: self.checks,
            xs: self.xs,
            missed_interactions: self.missed_interactions,
            created_at: self.created_at.unwrap_or(now),
            image_url: self.image_url,
            original_contacts: self.original_contacts,
            model_contacts: self.model_contacts,
            model_raw_response: self.model_raw_response,
        }
    }
}

/// Partial update of an evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationUpdate {
    pub id: Option<String>,
    pub image_id: Option<String>,
    pub model_name: Option<String>,
    pub user_id: Option<String>,
    pub score: Option<f64>,
    pub checks: Option<i64>,
    pub xs: Option<i64>,
    pub missed_interactions: Option<i64>,
    pub created_at: Option<String>,
    pub image_url: Option<String>,
    pub original_contacts: Option<Vec<String>>,
    pub model_contacts: Option<Vec<String>>,
    pub model_raw_response: Option<String>,
}

impl EvaluationUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------
// evaluation_sessions
// ---------------------------

/// A row from the `evaluation_sessions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRow {
    pub id: String,
    pub user_id: String,
    pub total_pairs: i64,
    pub completed_pairs: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl SessionRow {
    pub fn is_complete(&self) -> bool {
        self.completed_pairs >= self.total_pairs
    }
}

/// Shape for inserting a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInsert {
    pub id: Option<String>,
    pub user_id: String,
    pub total_pairs: i64,
    pub completed_pairs: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl SessionInsert {
    pub fn new(user_id: &str, total_pairs: i64) -> Self {
        Self {
            id: None,
            user_id: user_id.to_string(),
            total_pairs,
            completed_pairs: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub(crate) fn into_row(self, default_id: String, now: String) -> SessionRow {
        SessionRow {
            id: self.id.unwrap_or(default_id),
            user_id: self.user_id,
            total_pairs: self.total_pairs,
            completed_pairs: self.completed_pairs.unwrap_or(0),
            created_at: self.created_at.unwrap_or_else(|| now.clone()),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }
}

/// Partial update of a session. `updated_at` is refreshed when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub total_pairs: Option<i64>,
    pub completed_pairs: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
