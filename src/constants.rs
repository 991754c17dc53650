//! Constants used throughout the application.
//!
//! This module contains all constants used in the undertone backend, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "undertone";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A mood-aware journaling backend";

// Server Defaults
/// Default address the HTTP API binds to.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
/// Default SQLite database file, relative to the working directory.
pub const DEFAULT_DB_FILE: &str = "undertone.db";
/// Sentinel database path selecting the in-memory store.
pub const MEMORY_DB_PATH: &str = ":memory:";

// AI Defaults
/// Default base URL of the Ollama API.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
/// Default chat model used for mood analysis.
pub const DEFAULT_CHAT_MODEL: &str = "llama3.2:3b";
/// Default upper bound, in seconds, on a single mood-analysis request.
pub const DEFAULT_ANALYSIS_TIMEOUT_SECS: u64 = 30;

// Configuration Keys & Environment Variables
/// Environment variable for the HTTP bind address.
pub const ENV_VAR_ADDR: &str = "UNDERTONE_ADDR";
/// Environment variable for the SQLite database path.
pub const ENV_VAR_DB: &str = "UNDERTONE_DB";
/// Environment variable for the Ollama base URL.
pub const ENV_VAR_OLLAMA_URL: &str = "UNDERTONE_OLLAMA_URL";
/// Environment variable for the chat model name.
pub const ENV_VAR_CHAT_MODEL: &str = "UNDERTONE_CHAT_MODEL";
/// Environment variable for the analysis timeout in seconds.
pub const ENV_VAR_ANALYSIS_TIMEOUT: &str = "UNDERTONE_ANALYSIS_TIMEOUT_SECS";
/// Environment variable listing allowed CORS origins, comma-separated.
pub const ENV_VAR_CORS_ORIGINS: &str = "CORS_ORIGINS";

// Mood Model
/// Lowest valid mood score.
pub const MOOD_SCORE_MIN: u8 = 1;
/// Highest valid mood score.
pub const MOOD_SCORE_MAX: u8 = 10;
/// Number of trailing days covered by the weekly trend window.
pub const TREND_WINDOW_DAYS: i64 = 7;

// Logging Configuration
/// Default tracing filter when RUST_LOG is unset.
pub const DEFAULT_LOG_FILTER: &str = "undertone=info,tower_http=info";
/// Tracing filter used when --verbose is passed.
pub const VERBOSE_LOG_FILTER: &str = "undertone=debug,tower_http=debug";
