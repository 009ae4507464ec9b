//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Session lifetime in days.
    pub session_ttl_days: u64,
    /// Chat API key; presence selects the live tutor.
    pub openai_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `STUDYHUB_ADDR` | Server bind address | `127.0.0.1:8080` |
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:studyhub.db?mode=rwc` |
    /// | `SESSION_TTL_DAYS` | Session lifetime in days | `7` |
    /// | `OPENAI_API_KEY` | Chat API key; unset runs the demo tutor | (optional) |
    ///
    /// When `OPENAI_API_KEY` is set, the `OPENAI_*` variables documented
    /// on `OpenAiTutorConfig::from_env` are read as well.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("STUDYHUB_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:studyhub.db?mode=rwc".to_string());

        let session_ttl_days = env::var("SESSION_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7);

        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            addr,
            database_url,
            session_ttl_days,
            openai_api_key,
        })
    }

    /// Session lifetime as a duration.
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_days * 24 * 60 * 60)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid STUDYHUB_ADDR format")]
    InvalidAddr,
}
