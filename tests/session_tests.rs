mod common;
use common::{SAMPLE_DATASET, strs};
use vision_eval::core::pairs::BASE_IMAGE_URL;
use vision_eval::core::score::{ScoreInput, ScoreLogic};
use vision_eval::core::session::SessionLogic;
use vision_eval::db::models::{
    EvaluationInsert, EvaluationRow, EvaluationUpdate, SessionInsert, SessionRow, SessionUpdate,
};
use vision_eval::db::{EvalClient, EvaluationStore};
use vision_eval::errors::{AppError, AppResult};
use vision_eval::models::{Dataset, ModelName};

/// In-memory store standing in for the database.
#[derive(Default)]
struct FakeStore {
    evaluations: Vec<EvaluationRow>,
    sessions: Vec<SessionRow>,
    logs: Vec<(String, String)>,
    clock: u32,
}

impl FakeStore {
    /// Monotonic timestamps that sort as strings.
    fn tick(&mut self) -> String {
        self.clock += 1;
        format!("t{:06}", self.clock)
    }
}

impl EvaluationStore for FakeStore {
    fn insert_evaluation(&mut self, row: EvaluationInsert) -> AppResult<EvaluationRow> {
        let row = EvaluationRow {
            id: row
                .id
                .unwrap_or_else(|| format!("e{}", self.evaluations.len())),
            image_id: row.image_id,
            model_name: row.model_name,
            user_id: row.user_id,
            score: row.score,
            checks: row.checks,
            xs: row.xs,
            missed_interactions: row.missed_interactions,
            created_at: match row.created_at {
                Some(t) => t,
                None => self.tick(),
            },
            image_url: row.image_url,
            original_contacts: row.original_contacts,
            model_contacts: row.model_contacts,
            model_raw_response: row.model_raw_response,
        };
        self.evaluations.push(row.clone());
        Ok(row)
    }

    fn update_evaluation(&mut self, id: &str, upd: &EvaluationUpdate) -> AppResult<EvaluationRow> {
        let row = self
            .evaluations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::Other(format!("no evaluation {id}")))?;
        if let Some(s) = upd.score {
            row.score = Some(s);
        }
        Ok(row.clone())
    }

    fn get_evaluation(&self, id: &str) -> AppResult<Option<EvaluationRow>> {
        Ok(self.evaluations.iter().find(|r| r.id == id).cloned())
    }

    fn list_evaluations(&self, user_id: Option<&str>) -> AppResult<Vec<EvaluationRow>> {
        Ok(self
            .evaluations
            .iter()
            .filter(|r| user_id.is_none_or(|u| r.user_id == u))
            .cloned()
            .collect())
    }

    fn insert_session(&mut self, row: SessionInsert) -> AppResult<SessionRow> {
        let now = self.tick();
        let row = SessionRow {
            id: row.id.unwrap_or_else(|| format!("s{}", self.sessions.len())),
            user_id: row.user_id,
            total_pairs: row.total_pairs,
            completed_pairs: row.completed_pairs.unwrap_or(0),
            created_at: now.clone(),
            updated_at: now,
        };
        self.sessions.push(row.clone());
        Ok(row)
    }

    fn update_session(&mut self, id: &str, upd: &SessionUpdate) -> AppResult<SessionRow> {
        let row = self
            .sessions
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::Other(format!("no session {id}")))?;
        if let Some(c) = upd.completed_pairs {
            row.completed_pairs = c;
        }
        Ok(row.clone())
    }

    fn get_session(&self, id: &str) -> AppResult<Option<SessionRow>> {
        Ok(self.sessions.iter().find(|r| r.id == id).cloned())
    }

    fn list_sessions(&self, user_id: Option<&str>) -> AppResult<Vec<SessionRow>> {
        Ok(self
            .sessions
            .iter()
            .filter(|r| user_id.is_none_or(|u| r.user_id == u))
            .cloned()
            .collect())
    }

    fn log(&mut self, operation: &str, target: &str, _message: &str) -> AppResult<()> {
        self.logs.push((operation.to_string(), target.to_string()));
        Ok(())
    }
}

fn sample() -> Dataset {
    Dataset::from_json_str(SAMPLE_DATASET).unwrap()
}

#[test]
fn test_start_session_sizes_to_pairs() {
    let mut store = FakeStore::default();

    let started =
        SessionLogic::start(&mut store, &sample(), BASE_IMAGE_URL, Some("u1".into()), Some(9))
            .unwrap();

    assert_eq!(started.pairs.len(), 7);
    assert_eq!(started.session.total_pairs, 7);
    assert_eq!(started.session.completed_pairs, 0);
    assert_eq!(started.session.user_id, "u1");
    assert_eq!(store.sessions.len(), 1);
    assert_eq!(store.logs, vec![("session_start".to_string(), "u1".to_string())]);
}

#[test]
fn test_start_session_generates_user_id() {
    let mut store = FakeStore::default();

    let started = SessionLogic::start(&mut store, &sample(), BASE_IMAGE_URL, None, None).unwrap();
    assert!(vision_eval::core::ids::is_user_id(&started.session.user_id));
}

#[test]
fn test_seeded_session_order_is_reproducible() {
    let mut a = FakeStore::default();
    let mut b = FakeStore::default();

    let pa = SessionLogic::start(&mut a, &sample(), BASE_IMAGE_URL, Some("u".into()), Some(5))
        .unwrap()
        .pairs;
    let pb = SessionLogic::start(&mut b, &sample(), BASE_IMAGE_URL, Some("u".into()), Some(5))
        .unwrap()
        .pairs;
    assert_eq!(pa, pb);
}

#[test]
fn test_score_records_and_advances_session() {
    let mut store = FakeStore::default();
    let dataset = sample();
    SessionLogic::start(&mut store, &dataset, BASE_IMAGE_URL, Some("u1".into()), Some(1)).unwrap();

    let input = ScoreInput {
        score: Some(4.0),
        missed_interactions: Some(1),
        ..ScoreInput::new("u1", "img_b", ModelName::Llama4Scout)
    };
    let outcome = ScoreLogic::record(&mut store, &dataset, BASE_IMAGE_URL, &input).unwrap();

    assert_eq!(outcome.evaluation.image_id, "img_b");
    assert_eq!(outcome.evaluation.model_name, "llama4_scout");
    assert_eq!(outcome.evaluation.model_contacts, strs(&["hand-cup"]));
    assert_eq!(outcome.evaluation.original_contacts, strs(&["hand-cup", "foot-floor"]));
    assert_eq!(outcome.evaluation.model_raw_response, "contacts: hand-cup");
    assert_eq!(outcome.evaluation.score, Some(4.0));
    assert_eq!(outcome.evaluation.missed_interactions, Some(1));
    assert!(outcome.evaluation.image_url.ends_with("/img_b.png"));

    assert_eq!(outcome.session.unwrap().completed_pairs, 1);
    assert_eq!(store.logs.last().unwrap().0, "score");
}

#[test]
fn test_score_counts_towards_latest_session_only() {
    let mut store = FakeStore::default();
    let dataset = sample();
    SessionLogic::start(&mut store, &dataset, BASE_IMAGE_URL, Some("u1".into()), Some(1)).unwrap();
    SessionLogic::start(&mut store, &dataset, BASE_IMAGE_URL, Some("u1".into()), Some(2)).unwrap();

    let input = ScoreInput::new("u1", "img_a", ModelName::Original);
    ScoreLogic::record(&mut store, &dataset, BASE_IMAGE_URL, &input).unwrap();

    let sessions = SessionLogic::progress(&store, "u1").unwrap();
    assert_eq!(sessions[0].completed_pairs, 0);
    assert_eq!(sessions[1].completed_pairs, 1);
}

#[test]
fn test_score_never_exceeds_total() {
    let mut store = FakeStore::default();
    let mut dataset = Dataset::new();
    dataset.insert("only", vision_eval::models::ImageData::new("only", strs(&["x"])));

    SessionLogic::start(&mut store, &dataset, BASE_IMAGE_URL, Some("u1".into()), None).unwrap();

    let input = ScoreInput::new("u1", "only", ModelName::Original);
    for _ in 0..3 {
        ScoreLogic::record(&mut store, &dataset, BASE_IMAGE_URL, &input).unwrap();
    }

    let s = SessionLogic::current(&store, "u1").unwrap().unwrap();
    assert_eq!(s.completed_pairs, 1);
    assert_eq!(s.total_pairs, 1);
    assert_eq!(store.evaluations.len(), 3);
}

#[test]
fn test_score_without_session_still_records() {
    let mut store = FakeStore::default();

    let input = ScoreInput::new("u9", "img_a", ModelName::Gemini);
    let outcome = ScoreLogic::record(&mut store, &sample(), BASE_IMAGE_URL, &input).unwrap();

    assert!(outcome.session.is_none());
    assert_eq!(store.evaluations.len(), 1);
}

#[test]
fn test_score_for_absent_model_is_rejected() {
    let mut store = FakeStore::default();

    let input = ScoreInput::new("u1", "img_a", ModelName::Llama4Scout);
    let err = ScoreLogic::record(&mut store, &sample(), BASE_IMAGE_URL, &input).unwrap_err();

    assert!(matches!(err, AppError::PairNotFound { .. }));
    assert!(store.evaluations.is_empty());
}

#[test]
fn test_workflow_against_sqlite() {
    let mut client = EvalClient::in_memory().unwrap();
    let dataset = sample();

    let started =
        SessionLogic::start(&mut client, &dataset, BASE_IMAGE_URL, Some("u1".into()), Some(3))
            .unwrap();

    for pair in started.pairs.iter().take(2) {
        let input = ScoreInput {
            checks: Some(2),
            ..ScoreInput::new("u1", &pair.image_id, pair.model_name)
        };
        ScoreLogic::record(&mut client, &dataset, BASE_IMAGE_URL, &input).unwrap();
    }

    let session = client.get_session(&started.session.id).unwrap().unwrap();
    assert_eq!(session.completed_pairs, 2);
    assert_eq!(session.total_pairs, 7);

    let rows = client.list_evaluations(Some("u1")).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].image_id, started.pairs[0].image_id);
    assert_eq!(rows[0].model_name, started.pairs[0].model_name.as_str());
    assert!(rows.iter().all(|r| r.checks == Some(2)));
}

#[test]
fn test_rescoring_a_pair_does_not_advance_session() {
    let mut store = FakeStore::default();
    let dataset = sample();
    SessionLogic::start(&mut store, &dataset, BASE_IMAGE_URL, Some("u1".into()), Some(1)).unwrap();

    let input = ScoreInput::new("u1", "img_a", ModelName::Gemini);
    for _ in 0..3 {
        ScoreLogic::record(&mut store, &dataset, BASE_IMAGE_URL, &input).unwrap();
    }

    let s = SessionLogic::current(&store, "u1").unwrap().unwrap();
    assert_eq!(s.total_pairs, 7);
    assert_eq!(s.completed_pairs, 1);
    assert_eq!(store.evaluations.len(), 3);

    let other = ScoreInput::new("u1", "img_a", ModelName::Original);
    let outcome = ScoreLogic::record(&mut store, &dataset, BASE_IMAGE_URL, &other).unwrap();
    assert_eq!(outcome.session.unwrap().completed_pairs, 2);
}

#[test]
fn test_pair_judged_in_earlier_session_counts_again() {
    let mut store = FakeStore::default();
    let dataset = sample();
    let input = ScoreInput::new("u1", "img_b", ModelName::Original);

    SessionLogic::start(&mut store, &dataset, BASE_IMAGE_URL, Some("u1".into()), Some(1)).unwrap();
    ScoreLogic::record(&mut store, &dataset, BASE_IMAGE_URL, &input).unwrap();

    SessionLogic::start(&mut store, &dataset, BASE_IMAGE_URL, Some("u1".into()), Some(2)).unwrap();
    let outcome = ScoreLogic::record(&mut store, &dataset, BASE_IMAGE_URL, &input).unwrap();

    assert_eq!(outcome.session.unwrap().completed_pairs, 1);
}

#[test]
fn test_other_annotators_do_not_mark_pairs_judged() {
    let mut store = FakeStore::default();
    let dataset = sample();
    SessionLogic::start(&mut store, &dataset, BASE_IMAGE_URL, Some("u1".into()), Some(1)).unwrap();

    let theirs = ScoreInput::new("u2", "img_c", ModelName::Llama4Scout);
    ScoreLogic::record(&mut store, &dataset, BASE_IMAGE_URL, &theirs).unwrap();

    let mine = ScoreInput::new("u1", "img_c", ModelName::Llama4Scout);
    let outcome = ScoreLogic::record(&mut store, &dataset, BASE_IMAGE_URL, &mine).unwrap();
    assert_eq!(outcome.session.unwrap().completed_pairs, 1);
}

#[test]
fn test_rescoring_against_sqlite() {
    let mut client = EvalClient::in_memory().unwrap();
    let dataset = sample();
    let started =
        SessionLogic::start(&mut client, &dataset, BASE_IMAGE_URL, Some("u1".into()), Some(8))
            .unwrap();

    let input = ScoreInput::new("u1", "img_b", ModelName::Gemini);
    for _ in 0..3 {
        ScoreLogic::record(&mut client, &dataset, BASE_IMAGE_URL, &input).unwrap();
    }

    let session = client.get_session(&started.session.id).unwrap().unwrap();
    assert_eq!(session.completed_pairs, 1);
    assert_eq!(client.list_evaluations(Some("u1")).unwrap().len(), 3);
}
