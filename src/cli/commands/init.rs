use crate::cli::commands::open_client;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::EvaluationStore;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    //
    // 1️⃣ CONFIGURATION
    //
    let database = Config::init_all(cli.db.clone(), cli.test)?;

    println!("⚙️  Initializing vision-eval…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database    : {}", &database);

    //
    // 2️⃣ DATABASE (tables + migrations)
    //
    let db_cfg = Config {
        database: database.clone(),
        ..cfg.clone()
    };
    let mut client = open_client(&db_cfg)?;

    success(format!("Database initialized at {}", &database));

    //
    // 3️⃣ INTERNAL LOG (non-blocking)
    //
    if let Err(e) = client.log(
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &database),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 vision-eval initialization completed!");
    Ok(())
}
