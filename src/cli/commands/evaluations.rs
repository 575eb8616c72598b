use crate::cli::commands::open_client;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::EvaluationStore;
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_missed};
use crate::utils::formatting::{format_contacts, format_optional, truncate};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Evaluations { user, json } = cmd {
        let client = open_client(cfg)?;
        let rows = client.list_evaluations(user.as_deref())?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        if rows.is_empty() {
            println!("No evaluations found.");
            return Ok(());
        }

        let mut table = Table::new([
            "IMAGE", "MODEL", "USER", "SCORE", "CHECKS", "XS", "MISSED", "CONTACTS",
        ]);
        for r in &rows {
            table.add_row(vec![
                r.image_id.clone(),
                r.model_name.clone(),
                r.user_id.clone(),
                format_optional(r.score),
                format_optional(r.checks),
                format_optional(r.xs),
                format_optional(r.missed_interactions),
                truncate(&format_contacts(&r.model_contacts), 40),
            ]);
        }
        print!("{}", table.render());

        let missed: i64 = rows.iter().filter_map(|r| r.missed_interactions).sum();
        let any = rows.iter().any(|r| r.missed_interactions.is_some());
        println!(
            "\n{} evaluations, {}{} missed interactions{}",
            rows.len(),
            color_for_missed(any.then_some(missed)),
            missed,
            RESET
        );
    }

    Ok(())
}
