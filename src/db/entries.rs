//! Entry CRUD operations.
//!
//! This module provides functions for creating, reading, updating, and
//! querying journal entries in the database. Row decoding is split from the
//! SQL closures so that a damaged row surfaces as `StoreError::Corrupt`
//! instead of a bare SQLite error.

use crate::errors::StoreError;
use crate::journal::{Emotion, JournalEntry};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use tracing::debug;
use uuid::Uuid;

/// Raw column values for one entry row, before decoding.
struct RawEntryRow {
    id: String,
    title: String,
    content: String,
    tags: String,
    mood_score: Option<i64>,
    mood_emotion: Option<String>,
    ai_summary: Option<String>,
    date: String,
    created_at: String,
    updated_at: String,
}

const ENTRY_COLUMNS: &str =
    "id, title, content, tags, mood_score, mood_emotion, ai_summary, date, created_at, updated_at";

fn read_raw_row(row: &Row<'_>) -> rusqlite::Result<RawEntryRow> {
    Ok(RawEntryRow {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        tags: row.get(3)?,
        mood_score: row.get(4)?,
        mood_emotion: row.get(5)?,
        ai_summary: row.get(6)?,
        date: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Decodes a raw row into a `JournalEntry`.
///
/// Every conversion failure means the row no longer matches what this
/// application writes, so they all map to `StoreError::Corrupt`.
fn decode_row(raw: RawEntryRow) -> Result<JournalEntry, StoreError> {
    let id = Uuid::parse_str(&raw.id)
        .map_err(|e| StoreError::Corrupt(format!("invalid entry id {:?}: {}", raw.id, e)))?;

    let tags: Vec<String> = serde_json::from_str(&raw.tags)
        .map_err(|e| StoreError::Corrupt(format!("invalid tags for entry {}: {}", id, e)))?;

    let mood_score = match raw.mood_score {
        Some(score) => Some(u8::try_from(score).map_err(|_| {
            StoreError::Corrupt(format!("mood score {} out of range for entry {}", score, id))
        })?),
        None => None,
    };

    let mood_emotion = match raw.mood_emotion {
        Some(label) => Some(Emotion::from_label(&label).ok_or_else(|| {
            StoreError::Corrupt(format!("unknown emotion {:?} for entry {}", label, id))
        })?),
        None => None,
    };

    let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d")
        .map_err(|e| StoreError::Corrupt(format!("invalid date for entry {}: {}", id, e)))?;

    let created_at = parse_timestamp(&raw.created_at, id, "created_at")?;
    let updated_at = parse_timestamp(&raw.updated_at, id, "updated_at")?;

    Ok(JournalEntry {
        id,
        title: raw.title,
        content: raw.content,
        tags,
        mood_score,
        mood_emotion,
        ai_summary: raw.ai_summary,
        date,
        created_at,
        updated_at,
    })
}

fn parse_timestamp(value: &str, id: Uuid, column: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("invalid {} for entry {}: {}", column, id, e)))
}

fn tags_to_json(tags: &[String]) -> Result<String, StoreError> {
    serde_json::to_string(tags)
        .map_err(|e| StoreError::Corrupt(format!("tags not serializable: {}", e)))
}

/// Inserts a new journal entry.
///
/// # Errors
///
/// Returns an error if the database operation fails, including when an
/// entry with the same id already exists.
pub fn insert_entry(conn: &Connection, entry: &JournalEntry) -> Result<(), StoreError> {
    debug!("Inserting entry {}", entry.id);

    conn.execute(
        r#"
        INSERT INTO entries (id, title, content, tags, mood_score, mood_emotion, ai_summary, date, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
        params![
            entry.id.to_string(),
            entry.title,
            entry.content,
            tags_to_json(&entry.tags)?,
            entry.mood_score.map(|s| s as i64),
            entry.mood_emotion.map(|e| e.as_str()),
            entry.ai_summary,
            entry.date.to_string(),
            entry.created_at.to_rfc3339(),
            entry.updated_at.to_rfc3339(),
        ],
    )?;

    Ok(())
}

/// Retrieves an entry by id.
///
/// # Errors
///
/// Returns an error if the database operation fails or the row cannot be
/// decoded. Returns `Ok(None)` if no entry exists with the given id.
pub fn get_entry(conn: &Connection, id: Uuid) -> Result<Option<JournalEntry>, StoreError> {
    debug!("Getting entry {}", id);

    let result = conn.query_row(
        &format!("SELECT {} FROM entries WHERE id = ?1", ENTRY_COLUMNS),
        params![id.to_string()],
        read_raw_row,
    );

    match result {
        Ok(raw) => Ok(Some(decode_row(raw)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(StoreError::Sqlite(e)),
    }
}

/// Lists all entries, newest first.
///
/// Entries are ordered by creation time descending. Timestamps are stored
/// as RFC 3339 UTC text, so lexicographic order matches chronological.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_entries(conn: &Connection) -> Result<Vec<JournalEntry>, StoreError> {
    debug!("Listing all entries");

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM entries ORDER BY created_at DESC, id",
        ENTRY_COLUMNS
    ))?;

    let rows = stmt.query_map([], read_raw_row)?;

    let mut entries = Vec::new();
    for raw in rows {
        entries.push(decode_row(raw?)?);
    }

    debug!("Listed {} entries", entries.len());
    Ok(entries)
}

/// Updates an existing entry in place.
///
/// The id, creation day, and `created_at` are immutable; everything else
/// is overwritten from the given entry.
///
/// Returns `false` if no entry exists with the given id.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn update_entry(conn: &Connection, entry: &JournalEntry) -> Result<bool, StoreError> {
    debug!("Updating entry {}", entry.id);

    let rows_affected = conn.execute(
        r#"
        UPDATE entries
        SET title = ?2, content = ?3, tags = ?4, mood_score = ?5,
            mood_emotion = ?6, ai_summary = ?7, updated_at = ?8
        WHERE id = ?1
        "#,
        params![
            entry.id.to_string(),
            entry.title,
            entry.content,
            tags_to_json(&entry.tags)?,
            entry.mood_score.map(|s| s as i64),
            entry.mood_emotion.map(|e| e.as_str()),
            entry.ai_summary,
            entry.updated_at.to_rfc3339(),
        ],
    )?;

    Ok(rows_affected > 0)
}

/// Deletes an entry by id.
///
/// Returns `false` if no entry exists with the given id.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn delete_entry(conn: &Connection, id: Uuid) -> Result<bool, StoreError> {
    debug!("Deleting entry {}", id);

    let rows_affected = conn.execute(
        "DELETE FROM entries WHERE id = ?1",
        params![id.to_string()],
    )?;

    Ok(rows_affected > 0)
}

/// Retrieves all entries dated on or after the cutoff, oldest first.
///
/// Used for trend aggregation, where the window is computed by the caller.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn entries_since(
    conn: &Connection,
    cutoff: NaiveDate,
) -> Result<Vec<JournalEntry>, StoreError> {
    debug!("Fetching entries since {}", cutoff);

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM entries WHERE date >= ?1 ORDER BY date ASC, created_at ASC",
        ENTRY_COLUMNS
    ))?;

    let rows = stmt.query_map(params![cutoff.to_string()], read_raw_row)?;

    let mut entries = Vec::new();
    for raw in rows {
        entries.push(decode_row(raw?)?);
    }

    Ok(entries)
}
