//! Configuration management for the undertone backend.
//!
//! This module handles loading and validating configuration settings from
//! environment variables, with sensible defaults. Command line flags can
//! override individual fields after loading; `.env` files are read by the
//! binary before this module runs.
//!
//! # Environment Variables
//!
//! - `UNDERTONE_ADDR`: Socket address to listen on (defaults to 127.0.0.1:8000)
//! - `UNDERTONE_DB`: Path to the SQLite database file, or `:memory:` (defaults to undertone.db)
//! - `UNDERTONE_OLLAMA_URL`: Base URL of the Ollama API (defaults to http://127.0.0.1:11434)
//! - `UNDERTONE_CHAT_MODEL`: Chat model used for mood analysis (defaults to llama3.2:3b)
//! - `UNDERTONE_ANALYSIS_TIMEOUT_SECS`: Analysis request timeout (defaults to 30)
//! - `CORS_ORIGINS`: Comma separated allowed origins, or `*` (defaults to `*`)

use crate::constants::{
    DEFAULT_ANALYSIS_TIMEOUT_SECS, DEFAULT_BIND_ADDR, DEFAULT_CHAT_MODEL, DEFAULT_DB_FILE,
    DEFAULT_OLLAMA_URL, ENV_VAR_ADDR, ENV_VAR_ANALYSIS_TIMEOUT, ENV_VAR_CHAT_MODEL,
    ENV_VAR_CORS_ORIGINS, ENV_VAR_DB, ENV_VAR_OLLAMA_URL,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the undertone backend.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use undertone::Config;
///
/// let mut config = Config::default();
/// config.chat_model = "mistral:7b".to_string();
/// assert!(config.validate().is_ok());
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use undertone::Config;
///
/// let config = Config::load().expect("Failed to load configuration");
/// println!("listening on {}", config.bind_addr);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Path to the SQLite database file. The special value `:memory:`
    /// selects an in-memory database that vanishes on exit.
    pub db_path: String,

    /// Base URL of the Ollama API, without a trailing slash.
    pub ollama_url: String,

    /// Chat model used for mood analysis.
    pub chat_model: String,

    /// Timeout for one analysis request.
    pub analysis_timeout: Duration,

    /// Comma separated CORS origin list, or `*` for any origin.
    pub cors_origins: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            // DEFAULT_BIND_ADDR is a valid literal, checked by tests
            bind_addr: DEFAULT_BIND_ADDR.parse().unwrap_or_else(|_| {
                SocketAddr::from(([127, 0, 0, 1], 8000))
            }),
            db_path: DEFAULT_DB_FILE.to_string(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            analysis_timeout: Duration::from_secs(DEFAULT_ANALYSIS_TIMEOUT_SECS),
            cors_origins: "*".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The listen address cannot be parsed as a socket address
    /// - The analysis timeout is not a positive integer
    pub fn load() -> AppResult<Self> {
        let bind_addr_raw =
            env::var(ENV_VAR_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr_raw.parse().map_err(|e| {
            AppError::Config(format!("Invalid listen address {:?}: {}", bind_addr_raw, e))
        })?;

        let db_path = env::var(ENV_VAR_DB).unwrap_or_else(|_| DEFAULT_DB_FILE.to_string());

        // Trailing slashes would break URL joining in the Ollama client
        let ollama_url = env::var(ENV_VAR_OLLAMA_URL)
            .unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let chat_model =
            env::var(ENV_VAR_CHAT_MODEL).unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());

        let timeout_raw = env::var(ENV_VAR_ANALYSIS_TIMEOUT)
            .unwrap_or_else(|_| DEFAULT_ANALYSIS_TIMEOUT_SECS.to_string());
        let timeout_secs: u64 = timeout_raw.parse().map_err(|e| {
            AppError::Config(format!(
                "Invalid analysis timeout {:?}: {}",
                timeout_raw, e
            ))
        })?;
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "Analysis timeout must be at least 1 second".to_string(),
            ));
        }

        let cors_origins = env::var(ENV_VAR_CORS_ORIGINS).unwrap_or_else(|_| "*".to_string());

        let config = Config {
            bind_addr,
            db_path,
            ollama_url,
            chat_model,
            analysis_timeout: Duration::from_secs(timeout_secs),
            cors_origins,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the database path, Ollama URL, or
    /// chat model is empty, or if the Ollama URL is not http(s).
    pub fn validate(&self) -> AppResult<()> {
        if self.db_path.is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        if self.chat_model.is_empty() {
            return Err(AppError::Config("Chat model is empty".to_string()));
        }

        if !self.ollama_url.starts_with("http://") && !self.ollama_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "Ollama URL must start with http:// or https://, got {:?}",
                self.ollama_url
            )));
        }

        Ok(())
    }
}
