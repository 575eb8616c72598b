use crate::core::ids::generate_user_id;
use crate::core::pairs::process_vision_results_with_base;
use crate::core::shuffle::{shuffle, shuffle_with};
use crate::db::models::{SessionInsert, SessionRow};
use crate::db::store::EvaluationStore;
use crate::errors::AppResult;
use crate::models::{Dataset, EvaluationPair};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A freshly created session and the pairs its annotator will see, in order.
#[derive(Debug, Clone)]
pub struct StartedSession {
    pub session: SessionRow,
    pub pairs: Vec<EvaluationPair>,
}

/// High-level logic for annotation sessions.
pub struct SessionLogic;

impl SessionLogic {
    /// Build the pairs for `dataset`, shuffle them and open a session sized
    /// to match. A missing `user_id` gets a generated one; `seed` makes the
    /// order reproducible.
    pub fn start<S: EvaluationStore + ?Sized>(
        store: &mut S,
        dataset: &Dataset,
        base_url: &str,
        user_id: Option<String>,
        seed: Option<u64>,
    ) -> AppResult<StartedSession> {
        let user_id = user_id.unwrap_or_else(generate_user_id);

        let pairs = process_vision_results_with_base(dataset, base_url);
        let pairs = match seed {
            Some(s) => shuffle_with(&pairs, &mut StdRng::seed_from_u64(s)),
            None => shuffle(&pairs),
        };

        let session = store.insert_session(SessionInsert::new(&user_id, pairs.len() as i64))?;

        store.log(
            "session_start",
            &user_id,
            &format!("Session {} opened with {} pairs", session.id, session.total_pairs),
        )?;

        Ok(StartedSession { session, pairs })
    }

    /// Sessions of one annotator, oldest first.
    pub fn progress<S: EvaluationStore + ?Sized>(
        store: &S,
        user_id: &str,
    ) -> AppResult<Vec<SessionRow>> {
        store.list_sessions(Some(user_id))
    }

    /// The session new scores count towards: the annotator's latest one.
    pub fn current<S: EvaluationStore + ?Sized>(
        store: &S,
        user_id: &str,
    ) -> AppResult<Option<SessionRow>> {
        Ok(store.list_sessions(Some(user_id))?.pop())
    }
}
