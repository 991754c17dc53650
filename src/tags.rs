//! Tag index over journal entries.
//!
//! Tags live on the entries themselves; the index is derived on demand
//! rather than maintained separately, so it can never drift out of sync
//! with the entries.

use std::collections::BTreeSet;

use crate::journal::JournalEntry;

/// Collects the distinct tags across all given entries, sorted.
///
/// Comparison is case sensitive ("Work" and "work" are two tags) and empty
/// strings are dropped. The result is lexicographically sorted.
pub fn collect_tags(entries: &[JournalEntry]) -> Vec<String> {
    let mut tags = BTreeSet::new();
    for entry in entries {
        for tag in &entry.tags {
            if !tag.is_empty() {
                tags.insert(tag.clone());
            }
        }
    }
    tags.into_iter().collect()
}
