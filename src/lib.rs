//! vision-eval library root.
//! Exposes the pair transform, the storage client, the CLI parser and the
//! high-level run() function.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Pairs { .. } => cli::commands::pairs::handle(&cli.command, cfg),
        Commands::UserId => cli::commands::user_id::handle(),
        Commands::Session { .. } => cli::commands::session::handle(&cli.command, cfg),
        Commands::Sessions { .. } => cli::commands::sessions::handle(&cli.command, cfg),
        Commands::Score { .. } => cli::commands::score::handle(&cli.command, cfg),
        Commands::Evaluations { .. } => cli::commands::evaluations::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config ONCE (file, then environment)
    let mut cfg = Config::load()?;

    // 3️⃣ command-line override of the database endpoint
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
