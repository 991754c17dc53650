//! Core journal functionality for the undertone backend.
//!
//! This module contains the domain types for journal entries and the
//! `JournalService`, which implements the main operations: creating,
//! reading, updating, and deleting entries, plus the derived views
//! (weekly mood trend and tag index).
//!
//! The module follows a dependency injection pattern: the service owns a
//! store and an analyzer behind trait objects, allowing for flexible
//! configuration and easier testing.

pub mod entry;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ai::MoodAnalyzer;
use crate::db::EntryStore;
use crate::errors::{AppError, AppResult};
use crate::tags;
use crate::trends::{self, MoodTrend};

pub use entry::{Emotion, EntryPatch, JournalEntry, MoodAnalysis, NewEntry};

/// Service for journal operations.
///
/// This struct is the main entry point for entry operations. The HTTP
/// layer holds one instance and calls it from every handler; it is cheap
/// to clone because both dependencies sit behind `Arc`.
///
/// Mood analysis is strictly best effort: the analyzer runs before any
/// store write, and if it fails the entry is saved with all three analysis
/// fields null. A broken or absent model never blocks journaling.
#[derive(Clone)]
pub struct JournalService {
    /// Storage backend for entries
    store: Arc<dyn EntryStore>,

    /// Mood analyzer for scoring and summarizing content
    analyzer: Arc<dyn MoodAnalyzer>,
}

impl JournalService {
    /// Creates a new JournalService with the given dependencies.
    pub fn new(store: Arc<dyn EntryStore>, analyzer: Arc<dyn MoodAnalyzer>) -> Self {
        JournalService { store, analyzer }
    }

    /// Creates a new journal entry.
    ///
    /// The content is analyzed before the entry is written, so no store
    /// lock is held during the network call. Analysis failure downgrades
    /// to a warning and the entry is stored without analysis fields.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the title or content is empty or
    /// whitespace-only, or a store error if the write fails.
    pub async fn create_entry(&self, new: NewEntry) -> AppResult<JournalEntry> {
        validate_text("title", &new.title)?;
        validate_text("content", &new.content)?;

        let analysis = self.analyze_or_warn(&new.content).await;

        let now = Utc::now();
        let entry = JournalEntry {
            id: Uuid::new_v4(),
            title: new.title,
            content: new.content,
            tags: new.tags,
            mood_score: analysis.as_ref().map(|a| a.score),
            mood_emotion: analysis.as_ref().map(|a| a.emotion),
            ai_summary: analysis.map(|a| a.summary),
            date: now.date_naive(),
            created_at: now,
            updated_at: now,
        };

        self.store.insert(&entry)?;
        info!(
            "Created entry {} (analyzed: {})",
            entry.id,
            entry.has_analysis()
        );
        Ok(entry)
    }

    /// Fetches a single entry by id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no entry has the given id.
    pub fn get_entry(&self, id: Uuid) -> AppResult<JournalEntry> {
        self.store
            .get(id)?
            .ok_or_else(|| AppError::NotFound(format!("entry {}", id)))
    }

    /// Lists all entries, newest first.
    pub fn list_entries(&self) -> AppResult<Vec<JournalEntry>> {
        Ok(self.store.list()?)
    }

    /// Applies a partial update to an entry.
    ///
    /// Absent patch fields keep their stored values. The analyzer runs
    /// again only when the patch changes the content; in that case all
    /// three analysis fields are replaced together, which means a failed
    /// re-analysis clears a previously stored analysis rather than leaving
    /// one that describes stale content.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no entry has the given id, or
    /// `AppError::Validation` if a patched title or content is empty.
    pub async fn update_entry(&self, id: Uuid, patch: EntryPatch) -> AppResult<JournalEntry> {
        let mut entry = self.get_entry(id)?;

        if let Some(title) = &patch.title {
            validate_text("title", title)?;
        }
        if let Some(content) = &patch.content {
            validate_text("content", content)?;
        }

        let content_changed = patch
            .content
            .as_ref()
            .is_some_and(|content| *content != entry.content);

        if let Some(title) = patch.title {
            entry.title = title;
        }
        if let Some(content) = patch.content {
            entry.content = content;
        }
        if let Some(tags) = patch.tags {
            entry.tags = tags;
        }

        if content_changed {
            let analysis = self.analyze_or_warn(&entry.content).await;
            entry.mood_score = analysis.as_ref().map(|a| a.score);
            entry.mood_emotion = analysis.as_ref().map(|a| a.emotion);
            entry.ai_summary = analysis.map(|a| a.summary);
        }

        entry.updated_at = Utc::now();

        // The entry may have been deleted between the read and this write
        if !self.store.update(&entry)? {
            return Err(AppError::NotFound(format!("entry {}", id)));
        }

        info!("Updated entry {} (re-analyzed: {})", id, content_changed);
        Ok(entry)
    }

    /// Deletes an entry permanently.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no entry has the given id.
    pub fn delete_entry(&self, id: Uuid) -> AppResult<()> {
        if !self.store.delete(id)? {
            return Err(AppError::NotFound(format!("entry {}", id)));
        }
        info!("Deleted entry {}", id);
        Ok(())
    }

    /// Aggregates the mood trend over the last seven days.
    ///
    /// The window is inclusive: entries dated exactly seven days before
    /// today still count.
    pub fn weekly_trend(&self) -> AppResult<MoodTrend> {
        let cutoff = trends::window_start(Utc::now().date_naive());
        let entries = self.store.entries_since(cutoff)?;
        Ok(trends::aggregate(&entries))
    }

    /// Lists the distinct tags across all entries, sorted.
    pub fn list_tags(&self) -> AppResult<Vec<String>> {
        let entries = self.store.list()?;
        Ok(tags::collect_tags(&entries))
    }

    /// Runs the analyzer, turning failure into a logged warning.
    async fn analyze_or_warn(&self, content: &str) -> Option<MoodAnalysis> {
        match self.analyzer.analyze(content).await {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                warn!("Mood analysis failed, saving entry without analysis: {}", e);
                None
            }
        }
    }
}

/// Rejects empty or whitespace-only field values.
fn validate_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}
