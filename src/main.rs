/*!
# Undertone - A Mood-Aware Journaling Backend

Undertone serves a JSON HTTP API for personal journal entries. Each entry is
stored in SQLite and analyzed by a local Ollama model, which assigns a mood
score, a dominant emotion, and a one-sentence summary. The API also exposes
a weekly mood trend and a tag index.

This file contains the main application flow, coordinating the various
components to bring the server up.

## Usage

```
undertone [OPTIONS]

Options:
  -b, --bind <BIND>     Socket address to listen on (overrides UNDERTONE_ADDR)
      --db <DB>         SQLite database path, or :memory: (overrides UNDERTONE_DB)
  -v, --verbose         Print verbose output
  -h, --help            Print help information
  -V, --version         Print version information
```

## Configuration

The application can be configured with the following environment variables:
- `UNDERTONE_ADDR`: Socket address the API binds to (defaults to "127.0.0.1:8000")
- `UNDERTONE_DB`: SQLite database path, or ":memory:" (defaults to "undertone.db")
- `UNDERTONE_OLLAMA_URL`: Base URL of the Ollama API (defaults to "http://127.0.0.1:11434")
- `UNDERTONE_CHAT_MODEL`: Model used for mood analysis (defaults to "llama3.2:3b")
- `UNDERTONE_ANALYSIS_TIMEOUT_SECS`: Per-request analysis timeout (defaults to 30)
- `CORS_ORIGINS`: Comma-separated allowed origins, or "*" (defaults to "*")
- `RUST_LOG`: Tracing filter, overriding the built-in defaults
*/

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use undertone::ai::OllamaAnalyzer;
use undertone::cli::CliArgs;
use undertone::config::Config;
use undertone::constants::{DEFAULT_LOG_FILTER, MEMORY_DB_PATH, VERBOSE_LOG_FILTER};
use undertone::db::Database;
use undertone::errors::AppResult;
use undertone::journal::JournalService;
use undertone::server::{cors_layer, create_router, serve};

/// The main entry point for the undertone server.
///
/// This function coordinates the overall application flow:
/// 1. Initializes logging
/// 2. Parses command-line arguments
/// 3. Loads and validates configuration
/// 4. Opens the database and applies the schema
/// 5. Wires the journal service to storage and the mood analyzer
/// 6. Serves the HTTP API until interrupted
///
/// # Returns
///
/// A Result that is Ok(()) if the server shut down cleanly, or an AppError
/// if startup failed at any point.
///
/// # Errors
///
/// This function can return various types of errors, including:
/// - Configuration errors (unparseable bind address, invalid timeout)
/// - Storage errors (database file cannot be opened, schema failure)
/// - I/O errors (bind address already in use)
#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let args = CliArgs::parse();

    // Initialize tracing/logging
    let default_filter = if args.verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    debug!("CLI arguments: {:?}", args);

    // Load and validate configuration, then apply CLI overrides
    info!("Loading configuration");
    let mut config = Config::load()?;
    args.apply_to(&mut config);

    info!("Bind address: {}", config.bind_addr);
    info!("Database: {}", config.db_path);
    info!("Ollama: {} (model {})", config.ollama_url, config.chat_model);

    // Open the database and apply the schema
    let db = if config.db_path == MEMORY_DB_PATH {
        Database::open_in_memory()?
    } else {
        Database::open(Path::new(&config.db_path))?
    };
    db.initialize_schema()?;

    // Wire the journal service to storage and the mood analyzer
    let analyzer = OllamaAnalyzer::new(
        config.ollama_url.clone(),
        config.chat_model.clone(),
        config.analysis_timeout,
    );
    let service = JournalService::new(Arc::new(db), Arc::new(analyzer));

    // Serve the HTTP API until interrupted
    let router = create_router(service, cors_layer(&config.cors_origins));
    serve(config.bind_addr, router).await
}
