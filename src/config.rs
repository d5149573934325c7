use crate::constants::DEFAULT_FILTER_KEYS;
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error("SERVER_PORT is not a valid port: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub log_level: String,
    pub filter_keys: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source; `from_env` reads the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let port = lookup("SERVER_PORT").unwrap_or_else(|| "8080".to_string());
        let server_port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort(port.clone()))?;

        Ok(Config {
            database_url,
            server_port,
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            filter_keys: lookup("CAR_FILTER_KEYS")
                .map(|keys| parse_filter_keys(&keys))
                .unwrap_or_else(default_filter_keys),
        })
    }
}

pub fn default_filter_keys() -> Vec<String> {
    DEFAULT_FILTER_KEYS.iter().map(|k| k.to_string()).collect()
}

fn parse_filter_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
