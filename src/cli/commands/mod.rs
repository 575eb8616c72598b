pub mod config;
pub mod db;
pub mod evaluations;
pub mod init;
pub mod log;
pub mod pairs;
pub mod score;
pub mod session;
pub mod sessions;
pub mod user_id;

use crate::config::Config;
use crate::db::{ClientConfig, EvalClient};
use crate::errors::AppResult;

/// Open the configured database. Every command that touches storage goes
/// through here, so the client is built in exactly one place.
pub(crate) fn open_client(cfg: &Config) -> AppResult<EvalClient> {
    EvalClient::connect(ClientConfig::from_config(cfg))
}
