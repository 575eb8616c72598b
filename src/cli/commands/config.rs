use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{migrate_config_file, missing_fields};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::mask_key;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            let shown = Config {
                access_key: mask_key(&cfg.access_key),
                ..cfg.clone()
            };
            println!("📄 Current configuration:\n");
            println!("{}", serde_yaml::to_string(&shown)?);
        }

        if (*check || *migrate) && !path.exists() {
            info(format!(
                "No configuration file at {} (defaults in use).",
                path.display()
            ));
            return Ok(());
        }

        // ---- CHECK ----
        if *check {
            let missing = missing_fields(&path)?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!("Missing fields: {}", missing.join(", ")));
            }
        }

        // ---- MIGRATE ----
        if *migrate {
            migrate_config_file(&path)?;
        }
    }

    Ok(())
}
