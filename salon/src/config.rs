//! Configuration management for the salon client.
//!
//! Loads configuration from environment variables (and a `.env` file, if
//! present) with sensible defaults.

use salon_client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// How long a screen waits for its data when requests have no timeout
const DEFAULT_SCREEN_WAIT: Duration = Duration::from_secs(60);

/// Errors raised while reading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but its value is unusable
    #[error("Invalid value for {name}: '{value}' ({reason})")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Rejected value
        value: String,
        /// What was expected
        reason: &'static str,
    },
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    pub client: ClientConfig,
    /// Log level for the `salon` crates (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load `.env` (if any), then read the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an unusable value.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }
        Self::from_env()
    }

    /// Read configuration from the process environment
    ///
    /// - `SALON_BASE_URL` (default `http://localhost:3000`)
    /// - `SALON_GRAPHQL_PATH` (default `/graphql`)
    /// - `SALON_REQUEST_TIMEOUT_SECS` (unset: no timeout)
    /// - `SALON_LOG_LEVEL` (default `info`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through `lookup`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let request_timeout = match lookup("SALON_REQUEST_TIMEOUT_SECS") {
            None => None,
            Some(value) => Some(parse_timeout(&value)?),
        };

        Ok(Self {
            client: ClientConfig {
                base_url: lookup("SALON_BASE_URL").unwrap_or(defaults.client.base_url),
                graphql_path: lookup("SALON_GRAPHQL_PATH").unwrap_or(defaults.client.graphql_path),
                request_timeout,
            },
            log_level: lookup("SALON_LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// How long a screen waits for its data: twice the request timeout, or
    /// 60 seconds when requests have none
    #[must_use]
    pub fn screen_wait(&self) -> Duration {
        self.client
            .request_timeout
            .map_or(DEFAULT_SCREEN_WAIT, |timeout| timeout.saturating_mul(2))
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            name: "SALON_REQUEST_TIMEOUT_SECS",
            value: value.to_string(),
            reason: "expected a positive number of seconds",
        }),
    }
}
