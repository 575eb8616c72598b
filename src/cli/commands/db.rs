use crate::cli::commands::open_client;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{SCHEMA_VERSION, run_pending_migrations, schema_version};
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db { info, migrate } = cmd {
        // connecting already applies pending migrations
        let client = open_client(cfg)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            run_pending_migrations(client.conn())?;
            println!(
                "{}✔ Schema at v{} (latest v{}).{}\n",
                GREEN,
                schema_version(client.conn())?,
                SCHEMA_VERSION,
                RESET
            );
        }

        //
        // 2) INFO
        //
        if *info || !*migrate {
            stats::print_db_info(&client)?;
        }
    }

    Ok(())
}
