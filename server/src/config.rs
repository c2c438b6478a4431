//! Process configuration, read from the environment at startup.

use std::env;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::var("PORT").ok(), env::var("DATABASE_URL").ok())
    }

    /// Empty variables count as unset, so `PORT=` still gets the default
    /// and `DATABASE_URL=` still aborts startup.
    fn from_vars(port: Option<String>, database_url: Option<String>) -> Result<Self, ConfigError> {
        let port = match port.filter(|raw| !raw.is_empty()) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let database_url = database_url
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;
        Ok(Self { port, database_url })
    }
}
