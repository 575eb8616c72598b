use crate::cli::commands::open_client;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::errors::AppResult;
use crate::export::{ExportFormat, export_pairs};
use crate::models::Dataset;
use crate::ui::messages::{field, header, success};

/// Handle the `session` command: open a new annotation session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Session {
        input,
        user,
        seed,
        out,
    } = cmd
    {
        let dataset = Dataset::load(input)?;
        let mut client = open_client(cfg)?;

        let started = SessionLogic::start(
            &mut client,
            &dataset,
            &cfg.image_base_url,
            user.clone(),
            *seed,
        )?;

        header("New session");
        field("session", &started.session.id);
        field("user", &started.session.user_id);
        field("images", dataset.len());
        field("pairs", started.session.total_pairs);

        if let Some(path) = out {
            export_pairs(&started.pairs, ExportFormat::Json, Some(path), true)?;
        }

        success("Session started.");
    }

    Ok(())
}
