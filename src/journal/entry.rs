//! Domain types for journal entries and their mood analysis.
//!
//! This module contains the plain data shapes that flow between the store,
//! the analyzer, and the HTTP layer: the persisted `JournalEntry`, the
//! `NewEntry`/`EntryPatch` request payloads, and the `MoodAnalysis` produced
//! by the language model. No I/O happens here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of emotions an analysis may label an entry with.
///
/// The analyzer prompt instructs the model to pick one of these labels;
/// anything else the model invents is folded into `Neutral` rather than
/// rejected, so a creative model cannot fail an otherwise good analysis.
///
/// # Examples
///
/// ```
/// use undertone::journal::Emotion;
///
/// assert_eq!(Emotion::from_label("Happy"), Some(Emotion::Happy));
/// assert_eq!(Emotion::from_label("  grateful  "), Some(Emotion::Grateful));
/// assert_eq!(Emotion::from_label("ecstatic"), None);
/// assert_eq!(Emotion::Calm.as_str(), "calm");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Anxious,
    Excited,
    Calm,
    Angry,
    Grateful,
    Stressed,
    Content,
    Melancholy,
    Neutral,
}

impl Emotion {
    /// Every recognized emotion, in the order the analyzer prompt lists them.
    pub const ALL: [Emotion; 11] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Anxious,
        Emotion::Excited,
        Emotion::Calm,
        Emotion::Angry,
        Emotion::Grateful,
        Emotion::Stressed,
        Emotion::Content,
        Emotion::Melancholy,
        Emotion::Neutral,
    ];

    /// Returns the lowercase label used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Anxious => "anxious",
            Emotion::Excited => "excited",
            Emotion::Calm => "calm",
            Emotion::Angry => "angry",
            Emotion::Grateful => "grateful",
            Emotion::Stressed => "stressed",
            Emotion::Content => "content",
            Emotion::Melancholy => "melancholy",
            Emotion::Neutral => "neutral",
        }
    }

    /// Parses a model-produced label, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for labels outside the recognized set; callers decide
    /// whether that means `Neutral` (analysis parsing) or an error (storage,
    /// where an unknown label indicates corruption).
    pub fn from_label(label: &str) -> Option<Emotion> {
        let normalized = label.trim().to_lowercase();
        Emotion::ALL
            .iter()
            .copied()
            .find(|emotion| emotion.as_str() == normalized)
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted journal entry, including any AI-derived analysis fields.
///
/// The three analysis fields (`mood_score`, `mood_emotion`, `ai_summary`)
/// are always set or cleared together: either the analyzer produced a full
/// result for the current content, or all three are null.
///
/// `date` is the calendar day the entry belongs to (used for trend
/// windowing), while `created_at`/`updated_at` are full timestamps used
/// for ordering and audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier, assigned by the service at creation time.
    pub id: Uuid,

    /// Short title for the entry.
    pub title: String,

    /// The journal text itself.
    pub content: String,

    /// Free-form tags attached to the entry. May be empty.
    pub tags: Vec<String>,

    /// Mood score from 1 (lowest) to 10 (highest), if analysis succeeded.
    pub mood_score: Option<u8>,

    /// Dominant emotion label, if analysis succeeded.
    pub mood_emotion: Option<Emotion>,

    /// One-sentence summary of the entry, if analysis succeeded.
    pub ai_summary: Option<String>,

    /// Calendar day (UTC) the entry was written.
    pub date: NaiveDate,

    /// When the entry was first stored.
    pub created_at: DateTime<Utc>,

    /// When the entry was last modified. Equal to `created_at` until the
    /// first update.
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Whether this entry carries a complete mood analysis.
    pub fn has_analysis(&self) -> bool {
        self.mood_score.is_some()
    }
}

/// Request payload for creating a new entry.
///
/// Tags are optional in the JSON body; a missing field is treated as an
/// empty list.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request payload for updating an entry.
///
/// Every field is optional; absent fields keep their stored value. Note
/// that sending `content` equal to the stored content is still "absent"
/// as far as re-analysis is concerned: the analyzer only runs when the
/// content actually changes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl EntryPatch {
    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }
}

/// A complete mood analysis for one piece of journal content.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodAnalysis {
    /// Mood score, guaranteed to be within 1..=10.
    pub score: u8,

    /// Dominant emotion picked from the recognized set.
    pub emotion: Emotion,

    /// One-sentence summary of the content.
    pub summary: String,
}
