//! HTTP server for the journal API.
//!
//! Provides:
//! - CRUD endpoints for journal entries under /api/entries
//! - Weekly mood trend aggregation under /api/mood-trends/weekly
//! - The tag index under /api/tags
//! - A plain /health check
//!
//! The router owns a `JournalService` as shared state; every handler goes
//! through it rather than touching the store or analyzer directly.

pub mod routes;

use std::net::SocketAddr;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::errors::AppResult;
use crate::journal::JournalService;

/// Create the API router.
pub fn create_router(service: JournalService, cors: CorsLayer) -> Router {
    Router::new()
        // Entry CRUD
        .route(
            "/api/entries",
            post(routes::create_entry).get(routes::list_entries),
        )
        .route(
            "/api/entries/:id",
            get(routes::get_entry)
                .put(routes::update_entry)
                .delete(routes::delete_entry),
        )
        // Derived views
        .route("/api/mood-trends/weekly", get(routes::weekly_trend))
        .route("/api/tags", get(routes::list_tags))
        // Health check
        .route("/health", get(routes::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Builds the CORS layer from a comma separated origin list.
///
/// A single `*` means any origin. Unparseable origins are skipped with a
/// warning rather than failing startup.
pub fn cors_layer(origins: &str) -> CorsLayer {
    if origins.trim() == "*" {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Binds the listen socket and serves the router until shutdown.
pub async fn serve(addr: SocketAddr, router: Router) -> AppResult<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
