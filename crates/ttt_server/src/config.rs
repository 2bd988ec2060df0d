//! Application configuration from the process environment.

use derive_getters::Getters;
use derive_more::{Display, Error};
use std::str::FromStr;
use tracing::{debug, info};

use crate::locales::LocaleTag;

/// Name of the slash command this service answers.
pub const COMMAND_NAME: &str = "ttt";

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Slack credentials.
#[derive(Debug, Clone, Getters)]
pub struct SlackConfig {
    /// Web API token, checked against `auth.test` at startup.
    api_token: String,
    /// Shared secret Slack sends with each slash command.
    command_token: String,
}

/// Service configuration.
#[derive(Debug, Clone, Getters)]
pub struct AppConfig {
    /// Bind address.
    host: String,
    /// Bind port.
    port: u16,
    /// SQLite database path.
    database_url: String,
    /// Message catalog to use.
    locale: LocaleTag,
    /// Slack credentials.
    slack: SlackConfig,
}

impl AppConfig {
    /// Loads configuration from the environment, reading a `.env` file
    /// first when present.
    ///
    /// `SLACK_API_TOKEN` and `TTT_COMMAND_TOKEN` are required; `IP_ADDRESS`
    /// (default 127.0.0.1), `PORT` (default 3000), `DATABASE_URL` (default
    /// `ttt.db`) and `LOCALE` (default US_EN) are optional.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenvy::dotenv().is_ok() {
            debug!("Loaded .env file");
        }

        let host = std::env::var("IP_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid PORT '{}': {}", value, e)))?,
            Err(_) => 3000,
        };
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "ttt.db".to_string());
        let locale = match std::env::var("LOCALE") {
            Ok(value) => LocaleTag::from_str(&value)
                .map_err(|_| ConfigError::new(format!("Unknown locale '{}'", value)))?,
            Err(_) => LocaleTag::UsEn,
        };
        let api_token = std::env::var("SLACK_API_TOKEN").map_err(|_| {
            ConfigError::new("SLACK_API_TOKEN environment variable not set")
        })?;
        let command_token = std::env::var("TTT_COMMAND_TOKEN").map_err(|_| {
            ConfigError::new("TTT_COMMAND_TOKEN environment variable not set")
        })?;

        let config = Self {
            host,
            port,
            database_url,
            locale,
            slack: SlackConfig {
                api_token,
                command_token,
            },
        };
        info!(host = %config.host, port = config.port, db = %config.database_url, "Configuration loaded");
        Ok(config)
    }

    /// Overrides the bind address.
    pub fn with_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    /// Overrides the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides the database path.
    pub fn with_database_url(mut self, database_url: String) -> Self {
        self.database_url = database_url;
        self
    }
}
