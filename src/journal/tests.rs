use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::ai::MoodAnalyzer;
use crate::db::{Database, EntryStore};
use crate::errors::{AnalysisError, AppError};
use crate::journal::{Emotion, EntryPatch, JournalEntry, JournalService, MoodAnalysis, NewEntry};

/// Analyzer that can be switched to failure mid-test and counts its calls.
///
/// Each successful call produces a distinct summary so tests can tell
/// which analysis an entry ended up with.
struct SwitchableAnalyzer {
    succeed: AtomicBool,
    calls: AtomicUsize,
}

impl SwitchableAnalyzer {
    fn new() -> Arc<Self> {
        Arc::new(SwitchableAnalyzer {
            succeed: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        })
    }

    fn fail_from_now_on(&self) {
        self.succeed.store(false, Ordering::SeqCst);
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MoodAnalyzer for SwitchableAnalyzer {
    async fn analyze(&self, _content: &str) -> Result<MoodAnalysis, AnalysisError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.succeed.load(Ordering::SeqCst) {
            Ok(MoodAnalysis {
                score: 8,
                emotion: Emotion::Happy,
                summary: format!("Summary #{}", call),
            })
        } else {
            Err(AnalysisError::InvalidResponse("scripted failure".to_string()))
        }
    }
}

fn service_with(analyzer: Arc<SwitchableAnalyzer>) -> (JournalService, Arc<Database>) {
    let db = Arc::new(Database::open_in_memory().unwrap());
    db.initialize_schema().unwrap();
    let service = JournalService::new(db.clone(), analyzer);
    (service, db)
}

fn new_entry(title: &str, content: &str) -> NewEntry {
    NewEntry {
        title: title.to_string(),
        content: content.to_string(),
        tags: vec![],
    }
}

#[tokio::test]
async fn test_create_entry_stores_analysis() {
    let analyzer = SwitchableAnalyzer::new();
    let (service, _db) = service_with(analyzer.clone());

    let entry = service
        .create_entry(new_entry("Morning", "Slept well, feeling rested."))
        .await
        .unwrap();

    assert_eq!(entry.mood_score, Some(8));
    assert_eq!(entry.mood_emotion, Some(Emotion::Happy));
    assert_eq!(entry.ai_summary.as_deref(), Some("Summary #1"));
    assert_eq!(entry.date, Utc::now().date_naive());
    assert_eq!(entry.created_at, entry.updated_at);
    assert_eq!(analyzer.call_count(), 1);

    // The stored copy matches what was returned
    let stored = service.get_entry(entry.id).unwrap();
    assert_eq!(stored, entry);
}

#[tokio::test]
async fn test_create_entries_get_unique_ids() {
    let (service, _db) = service_with(SwitchableAnalyzer::new());

    let first = service
        .create_entry(new_entry("One", "First content"))
        .await
        .unwrap();
    let second = service
        .create_entry(new_entry("Two", "Second content"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_create_entry_survives_analyzer_failure() {
    let analyzer = SwitchableAnalyzer::new();
    analyzer.fail_from_now_on();
    let (service, _db) = service_with(analyzer);

    let entry = service
        .create_entry(new_entry("Offline day", "The model is down."))
        .await
        .unwrap();

    assert_eq!(entry.mood_score, None);
    assert_eq!(entry.mood_emotion, None);
    assert_eq!(entry.ai_summary, None);

    // Still persisted and retrievable
    let stored = service.get_entry(entry.id).unwrap();
    assert!(!stored.has_analysis());
}

#[tokio::test]
async fn test_create_entry_rejects_blank_fields() {
    let analyzer = SwitchableAnalyzer::new();
    let (service, _db) = service_with(analyzer.clone());

    let result = service.create_entry(new_entry("", "Content")).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let result = service.create_entry(new_entry("Title", "   \n\t")).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    // Validation happens before the analyzer is consulted
    assert_eq!(analyzer.call_count(), 0);
}

#[tokio::test]
async fn test_get_entry_not_found() {
    let (service, _db) = service_with(SwitchableAnalyzer::new());

    let result = service.get_entry(Uuid::new_v4());
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_list_entries_newest_first() {
    let (service, _db) = service_with(SwitchableAnalyzer::new());

    service
        .create_entry(new_entry("Oldest", "a"))
        .await
        .unwrap();
    service
        .create_entry(new_entry("Middle", "b"))
        .await
        .unwrap();
    service
        .create_entry(new_entry("Newest", "c"))
        .await
        .unwrap();

    let titles: Vec<String> = service
        .list_entries()
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn test_update_title_keeps_analysis() {
    let analyzer = SwitchableAnalyzer::new();
    let (service, _db) = service_with(analyzer.clone());

    let entry = service
        .create_entry(new_entry("Draft", "Stable content"))
        .await
        .unwrap();

    let patch = EntryPatch {
        title: Some("Final".to_string()),
        ..Default::default()
    };
    let updated = service.update_entry(entry.id, patch).await.unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.content, "Stable content");
    assert_eq!(updated.ai_summary.as_deref(), Some("Summary #1"));
    assert_eq!(updated.created_at, entry.created_at);
    assert!(updated.updated_at > entry.updated_at);
    // No re-analysis when content did not change
    assert_eq!(analyzer.call_count(), 1);
}

#[tokio::test]
async fn test_update_with_identical_content_skips_analysis() {
    let analyzer = SwitchableAnalyzer::new();
    let (service, _db) = service_with(analyzer.clone());

    let entry = service
        .create_entry(new_entry("Note", "Same words"))
        .await
        .unwrap();

    let patch = EntryPatch {
        content: Some("Same words".to_string()),
        ..Default::default()
    };
    let updated = service.update_entry(entry.id, patch).await.unwrap();

    assert_eq!(updated.ai_summary.as_deref(), Some("Summary #1"));
    assert_eq!(analyzer.call_count(), 1);
}

#[tokio::test]
async fn test_update_with_new_content_reanalyzes() {
    let analyzer = SwitchableAnalyzer::new();
    let (service, _db) = service_with(analyzer.clone());

    let entry = service
        .create_entry(new_entry("Note", "Original words"))
        .await
        .unwrap();

    let patch = EntryPatch {
        content: Some("Completely different words".to_string()),
        ..Default::default()
    };
    let updated = service.update_entry(entry.id, patch).await.unwrap();

    assert_eq!(updated.content, "Completely different words");
    assert_eq!(updated.ai_summary.as_deref(), Some("Summary #2"));
    assert_eq!(analyzer.call_count(), 2);
}

#[tokio::test]
async fn test_update_reanalysis_failure_clears_stale_analysis() {
    let analyzer = SwitchableAnalyzer::new();
    let (service, _db) = service_with(analyzer.clone());

    let entry = service
        .create_entry(new_entry("Note", "Original words"))
        .await
        .unwrap();
    assert!(entry.has_analysis());

    analyzer.fail_from_now_on();
    let patch = EntryPatch {
        content: Some("Changed words".to_string()),
        ..Default::default()
    };
    let updated = service.update_entry(entry.id, patch).await.unwrap();

    // The old analysis described the old content, so it must not survive
    assert_eq!(updated.mood_score, None);
    assert_eq!(updated.mood_emotion, None);
    assert_eq!(updated.ai_summary, None);
}

#[tokio::test]
async fn test_update_rejects_blank_patch_values() {
    let (service, _db) = service_with(SwitchableAnalyzer::new());

    let entry = service
        .create_entry(new_entry("Note", "Words"))
        .await
        .unwrap();

    let patch = EntryPatch {
        content: Some("  ".to_string()),
        ..Default::default()
    };
    let result = service.update_entry(entry.id, patch).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    // The entry is untouched
    let stored = service.get_entry(entry.id).unwrap();
    assert_eq!(stored.content, "Words");
}

#[tokio::test]
async fn test_update_missing_entry() {
    let (service, _db) = service_with(SwitchableAnalyzer::new());

    let patch = EntryPatch {
        title: Some("New".to_string()),
        ..Default::default()
    };
    let result = service.update_entry(Uuid::new_v4(), patch).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_then_get_not_found() {
    let (service, _db) = service_with(SwitchableAnalyzer::new());

    let entry = service
        .create_entry(new_entry("Doomed", "Short lived"))
        .await
        .unwrap();

    service.delete_entry(entry.id).unwrap();
    assert!(matches!(
        service.get_entry(entry.id),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_entry(entry.id),
        Err(AppError::NotFound(_))
    ));
}

/// Inserts an entry directly into the store with a chosen date and score.
fn seed_entry(db: &Database, date: NaiveDate, score: Option<u8>, tags: &[&str]) -> JournalEntry {
    let now = Utc::now();
    let entry = JournalEntry {
        id: Uuid::new_v4(),
        title: format!("Entry {}", date),
        content: "Seeded".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        mood_score: score,
        mood_emotion: score.map(|_| Emotion::Calm),
        ai_summary: score.map(|_| "Seeded summary".to_string()),
        date,
        created_at: now,
        updated_at: now,
    };
    db.insert(&entry).unwrap();
    entry
}

#[tokio::test]
async fn test_weekly_trend_window_is_inclusive() {
    let (service, db) = service_with(SwitchableAnalyzer::new());
    let today = Utc::now().date_naive();

    // Exactly seven days back is in; eight days back is out
    seed_entry(&db, today - Duration::days(7), Some(4), &[]);
    seed_entry(&db, today - Duration::days(8), Some(10), &[]);
    seed_entry(&db, today, Some(6), &[]);

    let trend = service.weekly_trend().unwrap();
    assert_eq!(trend.total_entries, 2);
    assert_eq!(trend.weekly_trends.len(), 2);
    assert_eq!(trend.average_mood, Some(5.0));
}

#[tokio::test]
async fn test_weekly_trend_counts_unscored_entries() {
    let (service, db) = service_with(SwitchableAnalyzer::new());
    let today = Utc::now().date_naive();

    seed_entry(&db, today, Some(9), &[]);
    seed_entry(&db, today - Duration::days(1), Some(3), &[]);
    seed_entry(&db, today - Duration::days(2), Some(8), &[]);
    seed_entry(&db, today - Duration::days(3), Some(9), &[]);
    seed_entry(&db, today - Duration::days(4), None, &[]);

    let trend = service.weekly_trend().unwrap();
    assert_eq!(trend.total_entries, 5);
    assert_eq!(trend.weekly_trends.len(), 4);
    assert_eq!(trend.average_mood, Some(7.3));
    assert_eq!(trend.most_common_emotion, Some(Emotion::Calm));
}

#[tokio::test]
async fn test_list_tags_distinct_and_sorted() {
    let (service, db) = service_with(SwitchableAnalyzer::new());
    let today = Utc::now().date_naive();

    seed_entry(&db, today, None, &["work", "health"]);
    seed_entry(&db, today, None, &["health", "family"]);
    seed_entry(&db, today, None, &[]);

    let tags = service.list_tags().unwrap();
    assert_eq!(tags, vec!["family", "health", "work"]);
}
