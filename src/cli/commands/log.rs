use crate::cli::commands::open_client;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let client = open_client(cfg)?;
        LogLogic::print_log(client.conn())?;
    }

    Ok(())
}
