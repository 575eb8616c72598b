use crate::core::pairs::BASE_IMAGE_URL;
use crate::errors::AppResult;
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

/// Environment variable holding the database endpoint.
pub const ENDPOINT_VAR: &str = "VISION_EVAL_DB_URL";
/// Environment variable holding the public access key.
pub const ACCESS_KEY_VAR: &str = "VISION_EVAL_ANON_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub access_key: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

fn default_image_base_url() -> String {
    BASE_IMAGE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            access_key: String::new(),
            image_base_url: default_image_base_url(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("vision-eval")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".vision-eval")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("vision-eval.conf")
    }

    /// Return the full path of the default SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("vision-eval.sqlite")
    }

    /// Load the configuration file (defaults when missing), then apply
    /// environment overrides.
    pub fn load() -> AppResult<Self> {
        let cfg = Self::load_from(&Self::config_file())?;
        Ok(cfg.with_env_overrides(|name| env::var(name).ok()))
    }

    /// Parse a configuration file, or return defaults if it does not exist.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Replace endpoint and access key with the values `lookup` finds.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENDPOINT_VAR).filter(|v| !v.trim().is_empty()) {
            self.database = url;
        }
        if let Some(key) = lookup(ACCESS_KEY_VAR) {
            self.access_key = key;
        }
        self
    }

    /// Create the config directory and file. Returns the database endpoint written.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB: user provided (relative names land in the config dir) or default
        let database = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() || name.contains(':') {
                    name
                } else {
                    dir.join(p).to_string_lossy().to_string()
                }
            }
            None => Self::database_file().to_string_lossy().to_string(),
        };

        let config = Config {
            database: database.clone(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {:?}", Self::config_file()));
        }

        Ok(database)
    }
}
