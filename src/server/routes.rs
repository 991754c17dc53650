//! Journal API HTTP routes
//!
//! Handlers for entry CRUD and the derived views. Handlers stay thin:
//! parse the path id, call the service, wrap the result. Error mapping
//! to status codes lives on `AppError` itself.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::journal::{EntryPatch, JournalEntry, JournalService, NewEntry};
use crate::trends::MoodTrend;

/// Parses a path segment as an entry id.
///
/// A malformed id is a validation error (400), not a missing entry (404):
/// no entry could ever have that id.
fn parse_entry_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("malformed entry id: {}", raw)))
}

/// POST /api/entries
pub async fn create_entry(
    State(service): State<JournalService>,
    Json(new): Json<NewEntry>,
) -> AppResult<(StatusCode, Json<JournalEntry>)> {
    let entry = service.create_entry(new).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/entries
pub async fn list_entries(
    State(service): State<JournalService>,
) -> AppResult<Json<Vec<JournalEntry>>> {
    Ok(Json(service.list_entries()?))
}

/// GET /api/entries/:id
pub async fn get_entry(
    State(service): State<JournalService>,
    Path(id): Path<String>,
) -> AppResult<Json<JournalEntry>> {
    let id = parse_entry_id(&id)?;
    Ok(Json(service.get_entry(id)?))
}

/// PUT /api/entries/:id
pub async fn update_entry(
    State(service): State<JournalService>,
    Path(id): Path<String>,
    Json(patch): Json<EntryPatch>,
) -> AppResult<Json<JournalEntry>> {
    let id = parse_entry_id(&id)?;
    Ok(Json(service.update_entry(id, patch).await?))
}

/// DELETE /api/entries/:id
pub async fn delete_entry(
    State(service): State<JournalService>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_entry_id(&id)?;
    service.delete_entry(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/mood-trends/weekly
pub async fn weekly_trend(State(service): State<JournalService>) -> AppResult<Json<MoodTrend>> {
    Ok(Json(service.weekly_trend()?))
}

/// Tag index response
#[derive(Serialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

/// GET /api/tags
pub async fn list_tags(State(service): State<JournalService>) -> AppResult<Json<TagsResponse>> {
    Ok(Json(TagsResponse {
        tags: service.list_tags()?,
    }))
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}
