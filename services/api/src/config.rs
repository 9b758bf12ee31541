use bolna_core::{
    DEFAULT_BOLNA_API_URL,
    upstream::{DEFAULT_TIMEOUT, UpstreamConfig},
};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub bolna_api_key: String,
    pub bolna_api_url: String,
    pub upstream_timeout: Duration,
    pub log_level: Level,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("bolna_api_key", &"<redacted>")
            .field("bolna_api_url", &self.bolna_api_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let bolna_api_key = std::env::var("BOLNA_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("BOLNA_API_KEY".to_string()))?;

        let bolna_api_url =
            std::env::var("BOLNA_API_URL").unwrap_or_else(|_| DEFAULT_BOLNA_API_URL.to_string());

        let upstream_timeout = match std::env::var("BOLNA_TIMEOUT_SECS") {
            Ok(secs) => secs
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "BOLNA_TIMEOUT_SECS".to_string(),
                        format!("'{}' is not a positive number of seconds", secs),
                    )
                })?,
            Err(_) => DEFAULT_TIMEOUT,
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            bolna_api_key,
            bolna_api_url,
            upstream_timeout,
            log_level,
        })
    }

    /// Connection settings for the shared Bolna API client.
    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig {
            base_url: self.bolna_api_url.clone(),
            api_key: self.bolna_api_key.clone(),
            timeout: self.upstream_timeout,
        }
    }
}
