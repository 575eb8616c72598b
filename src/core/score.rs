use crate::core::pairs::find_pair;
use crate::core::session::SessionLogic;
use crate::db::models::{EvaluationInsert, EvaluationRow, SessionRow, SessionUpdate};
use crate::db::store::EvaluationStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Dataset, EvaluationPair, ModelName};

/// What an annotator reported for one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreInput {
    pub user_id: String,
    pub image_id: String,
    pub model: ModelName,
    pub score: Option<f64>,
    pub checks: Option<i64>,
    pub xs: Option<i64>,
    pub missed_interactions: Option<i64>,
}

impl ScoreInput {
    pub fn new(user_id: &str, image_id: &str, model: ModelName) -> Self {
        Self {
            user_id: user_id.to_string(),
            image_id: image_id.to_string(),
            model,
            score: None,
            checks: None,
            xs: None,
            missed_interactions: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub evaluation: EvaluationRow,
    /// The session the score was counted towards, after the update.
    pub session: Option<SessionRow>,
}

/// High-level logic for the `score` command.
pub struct ScoreLogic;

impl ScoreLogic {
    /// Store the evaluation of one pair and advance the annotator's current
    /// session. Only the first evaluation of a pair within the session counts;
    /// a completed session is left as is.
    pub fn record<S: EvaluationStore + ?Sized>(
        store: &mut S,
        dataset: &Dataset,
        base_url: &str,
        input: &ScoreInput,
    ) -> AppResult<ScoreOutcome> {
        let pair = find_pair(dataset, base_url, &input.image_id, input.model).ok_or_else(|| {
            AppError::PairNotFound {
                image_id: input.image_id.clone(),
                model: input.model.to_string(),
            }
        })?;

        let insert = EvaluationInsert::from_pair(&pair, &input.user_id)
            .with_score(input.score)
            .with_checks(input.checks)
            .with_xs(input.xs)
            .with_missed_interactions(input.missed_interactions);

        let current = SessionLogic::current(&*store, &input.user_id)?;

        // a pair already judged in this session is re-scored, not progress
        let counts = match &current {
            Some(s) if !s.is_complete() => {
                !Self::already_judged(&*store, &input.user_id, &pair, &s.created_at)?
            }
            _ => false,
        };

        let evaluation = store.insert_evaluation(insert)?;

        let session = match current {
            Some(s) if counts => {
                let upd = SessionUpdate {
                    completed_pairs: Some(s.completed_pairs + 1),
                    ..Default::default()
                };
                Some(store.update_session(&s.id, &upd)?)
            }
            other => other,
        };

        store.log(
            "score",
            &format!("{}/{}", pair.image_id, pair.model_name),
            &format!("Evaluation {} recorded by {}", evaluation.id, input.user_id),
        )?;

        Ok(ScoreOutcome {
            evaluation,
            session,
        })
    }

    /// Whether `user_id` has evaluated this pair since `since`.
    fn already_judged<S: EvaluationStore + ?Sized>(
        store: &S,
        user_id: &str,
        pair: &EvaluationPair,
        since: &str,
    ) -> AppResult<bool> {
        let model = pair.model_name.as_str();
        Ok(store.list_evaluations(Some(user_id))?.iter().any(|e| {
            e.image_id == pair.image_id && e.model_name == model && e.created_at.as_str() >= since
        }))
    }
}
