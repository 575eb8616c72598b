use crate::cli::commands::open_client;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::score::{ScoreInput, ScoreLogic};
use crate::errors::{AppError, AppResult};
use crate::models::{Dataset, ModelName};
use crate::ui::messages::{info, success};
use crate::utils::formatting::format_progress;

/// Handle the `score` command: store one annotator judgement.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Score {
        user,
        input,
        image,
        model,
        score,
        checks,
        xs,
        missed,
    } = cmd
    {
        let model = ModelName::from_code(model).ok_or_else(|| AppError::InvalidModel(model.clone()))?;

        let dataset = Dataset::load(input)?;
        let mut client = open_client(cfg)?;

        let score_input = ScoreInput {
            score: *score,
            checks: *checks,
            xs: *xs,
            missed_interactions: *missed,
            ..ScoreInput::new(user, image, model)
        };

        let outcome = ScoreLogic::record(&mut client, &dataset, &cfg.image_base_url, &score_input)?;

        success(format!(
            "Evaluation {} recorded for {}/{}",
            outcome.evaluation.id, outcome.evaluation.image_id, outcome.evaluation.model_name
        ));

        match outcome.session {
            Some(s) => info(format!(
                "Session {}: {}",
                s.id,
                format_progress(s.completed_pairs, s.total_pairs)
            )),
            None => info(format!("No open session for {}", user)),
        }
    }

    Ok(())
}
