use crate::cli::commands::open_client;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::EvaluationStore;
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_progress};
use crate::utils::formatting::format_progress;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sessions { user } = cmd {
        let client = open_client(cfg)?;
        let sessions = client.list_sessions(user.as_deref())?;

        if sessions.is_empty() {
            println!("No sessions found.");
            return Ok(());
        }

        let mut table = Table::new(["SESSION", "USER", "PROGRESS", "CREATED", "UPDATED"]);
        for s in &sessions {
            table.add_row(vec![
                s.id.clone(),
                s.user_id.clone(),
                format_progress(s.completed_pairs, s.total_pairs),
                s.created_at.clone(),
                s.updated_at.clone(),
            ]);
        }
        print!("{}", table.render());

        let done = sessions.iter().filter(|s| s.is_complete()).count();
        println!(
            "\n{}{} of {} sessions completed{}",
            color_for_progress(done as i64, sessions.len() as i64),
            done,
            sessions.len(),
            RESET
        );
    }

    Ok(())
}
