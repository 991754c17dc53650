/*!
# Undertone

Undertone is a journaling backend with AI mood analysis, served over a JSON
HTTP API. It stores personal journal entries in SQLite and enriches each one
with a mood score, a dominant emotion, and a one-sentence summary produced by
a local Ollama model. Analysis is best-effort: when the model is unreachable
the entry is saved without it, and no analysis failure is ever surfaced to
the API caller.

## Core Features

- Create, read, update, and delete journal entries with titles, free-form
  content, and tags
- Score each entry's mood 1-10 and label it with one of eleven emotions
  using a local LLM
- Aggregate a rolling seven-day mood trend with the average score and the
  most common emotion
- Index every tag in use as a deduplicated, sorted list

## Architecture

The codebase follows a modular architecture with clear separation of concerns:

- `journal`: Entry model and the service layer tying storage to analysis
- `ai`: Ollama chat client, analysis prompt, and response parsing
- `db`: SQLite storage behind the `EntryStore` trait
- `trends`: Weekly mood trend aggregation
- `tags`: Tag collection across entries
- `server`: axum router and HTTP handlers
- `config`: Environment-driven runtime configuration
- `cli`: Command-line interface handling using clap
- `errors`: Error handling infrastructure

## Usage Example

```rust,no_run
use std::sync::Arc;
use undertone::ai::OllamaAnalyzer;
use undertone::db::Database;
use undertone::journal::JournalService;
use undertone::server::{cors_layer, create_router, serve};
use undertone::Config;

#[tokio::main]
async fn main() -> undertone::AppResult<()> {
    // Load configuration
    let config = Config::load()?;

    // Open the database and apply the schema
    let db = Database::open_in_memory()?;
    db.initialize_schema()?;

    // Wire the service and serve the API
    let analyzer = OllamaAnalyzer::new(
        config.ollama_url.clone(),
        config.chat_model.clone(),
        config.analysis_timeout,
    );
    let service = JournalService::new(Arc::new(db), Arc::new(analyzer));
    let router = create_router(service, cors_layer(&config.cors_origins));
    serve(config.bind_addr, router).await
}
```
*/

/// AI mood analysis: Ollama client, prompt, and response parsing
pub mod ai;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// SQLite storage for journal entries
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
/// Journal entry model and service layer
pub mod journal;
/// HTTP server, router, and request handlers
pub mod server;
/// Tag collection across entries
pub mod tags;
/// Weekly mood trend aggregation
pub mod trends;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use db::Database;
pub use errors::{AppError, AppResult};
pub use journal::JournalService;
