//! Weekly mood trend aggregation.
//!
//! Pure aggregation logic over a window of journal entries: no clock and no
//! storage access. The caller decides the window (normally the last seven
//! days) and fetches the entries; this module only summarizes them.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::constants::TREND_WINDOW_DAYS;
use crate::journal::{Emotion, JournalEntry};

/// One scored entry's contribution to the trend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub mood_score: u8,
    pub mood_emotion: Emotion,
}

/// Aggregated mood trend over a window of entries.
///
/// `total_entries` counts every entry in the window, scored or not, while
/// `weekly_trends` and the two summary fields only reflect entries that
/// carry an analysis. With no scored entries in the window, `average_mood`
/// and `most_common_emotion` are `None` and serialize as JSON null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodTrend {
    pub weekly_trends: Vec<TrendPoint>,
    pub average_mood: Option<f64>,
    pub most_common_emotion: Option<Emotion>,
    pub total_entries: usize,
}

/// First day of the trend window ending today.
///
/// The window covers the cutoff day itself, so with a seven day window an
/// entry dated exactly seven days ago is still included.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(TREND_WINDOW_DAYS)
}

/// Summarizes a window of entries into a mood trend.
///
/// Entries are expected in ascending date order, as `entries_since`
/// returns them; the trend line preserves that order, and the order
/// decides `most_common_emotion` when two emotions tie on count.
pub fn aggregate(entries: &[JournalEntry]) -> MoodTrend {
    let mut points = Vec::new();
    let mut counts = [0usize; Emotion::ALL.len()];
    let mut first_seen = [usize::MAX; Emotion::ALL.len()];

    for entry in entries {
        if let (Some(score), Some(emotion)) = (entry.mood_score, entry.mood_emotion) {
            if let Some(index) = Emotion::ALL.iter().position(|e| *e == emotion) {
                counts[index] += 1;
                if first_seen[index] == usize::MAX {
                    first_seen[index] = points.len();
                }
            }
            points.push(TrendPoint {
                date: entry.date,
                mood_score: score,
                mood_emotion: emotion,
            });
        }
    }

    let average_mood = if points.is_empty() {
        None
    } else {
        let sum: u32 = points.iter().map(|p| u32::from(p.mood_score)).sum();
        let average = f64::from(sum) / points.len() as f64;
        // One decimal place, ties rounded away from zero
        Some((average * 10.0).round() / 10.0)
    };

    // A tie on the count goes to the emotion that appears earliest in the
    // trend list.
    let mut best: Option<usize> = None;
    for (index, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let wins = match best {
            None => true,
            Some(current) => {
                count > counts[current]
                    || (count == counts[current] && first_seen[index] < first_seen[current])
            }
        };
        if wins {
            best = Some(index);
        }
    }
    let most_common_emotion = best.map(|index| Emotion::ALL[index]);

    MoodTrend {
        weekly_trends: points,
        average_mood,
        most_common_emotion,
        total_entries: entries.len(),
    }
}
