//! Layered settings shared by the server and the bot
//!
//! Precedence, lowest first: built-in defaults, the TOML file, `WORKOUT_*`
//! environment variables, then `TELEGRAM_BOT_TOKEN`.

use crate::error::{Result, WorkoutError};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Looked up in the working directory when no file is given
pub const DEFAULT_CONFIG_FILE: &str = "workout";

pub const ENV_PREFIX: &str = "WORKOUT";

pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";

pub const DEFAULT_AUTHORIZED_USER_ID: i64 = 6629263251;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub authorized_user_id: i64,
    pub bind_address: String,
    pub database_path: String,
    pub telegram_bot_token: Option<String>,
    pub telegram_api_url: String,
    pub poll_timeout_secs: u64,
}

impl Settings {
    /// Load from the process environment
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::from_sources(config_file, std::env::vars().collect())
    }

    /// Load with an explicit environment map
    pub fn from_sources(
        config_file: Option<&Path>,
        env: config::Map<String, String>,
    ) -> Result<Self> {
        let bot_token = env
            .get(BOT_TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let mut builder = Config::builder()
            .set_default("authorized_user_id", DEFAULT_AUTHORIZED_USER_ID)?
            .set_default("bind_address", "127.0.0.1:5000")?
            .set_default("database_path", "workout_tracker.db")?
            .set_default("telegram_api_url", "https://api.telegram.org")?
            .set_default("poll_timeout_secs", 30_i64)?;

        builder = match config_file {
            Some(path) => {
                debug!("Reading settings from {}", path.display());
                builder.add_source(File::from(path).required(true))
            }
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(Some(env)),
            )
            .set_override_option("telegram_bot_token", bot_token)?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.authorized_user_id <= 0 {
            return Err(WorkoutError::Config(format!(
                "authorized_user_id must be positive, got {}",
                self.authorized_user_id
            )));
        }
        if self.poll_timeout_secs == 0 {
            return Err(WorkoutError::Config(
                "poll_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The bot token, or the error reported when it is missing
    pub fn require_bot_token(&self) -> Result<&str> {
        self.telegram_bot_token
            .as_deref()
            .ok_or_else(|| {
                WorkoutError::Config(format!("{} environment variable is not set.", BOT_TOKEN_VAR))
            })
    }
}
