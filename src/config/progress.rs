//! Per-topic mastery tracking

use std::collections::BTreeMap;

use crate::catalog::CatalogIndex;
use crate::error::StorageError;
use crate::storage::{KeyValueStore, PROGRESS_KEY};

/// Aggregate progress against the current catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSummary {
    /// Revised topics that still exist in the catalog
    pub revised: usize,
    /// Topics in the catalog
    pub total: usize,
    /// Rounded percentage, 0 to 100
    pub percentage: u8,
}

/// Mastery flags keyed by topic id, persisted through a [`KeyValueStore`]
///
/// Every mutation writes the whole record before returning. Ids are never
/// checked against the catalog here, so flags survive content changes; the
/// aggregates simply ignore ids the catalog no longer has.
#[derive(Debug)]
pub struct ProgressStore<S: KeyValueStore> {
    store: S,
    revised: BTreeMap<String, bool>,
}

impl<S: KeyValueStore> ProgressStore<S> {
    /// Rehydrate the record from storage
    ///
    /// Missing, unreadable or corrupt data starts an empty record.
    pub fn load(store: S) -> Self {
        let revised: BTreeMap<String, bool> = match store.get(PROGRESS_KEY) {
            Ok(Some(contents)) if !contents.trim().is_empty() => {
                serde_json::from_str(&contents).unwrap_or_else(|e| {
                    tracing::warn!("Discarding unreadable progress record: {}", e);
                    BTreeMap::new()
                })
            }
            Ok(_) => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Failed to read progress, starting fresh: {}", e);
                BTreeMap::new()
            }
        };

        tracing::debug!("Loaded progress for {} topics", revised.len());
        Self { store, revised }
    }

    /// Whether a topic has been marked as revised
    pub fn is_revised(&self, topic_id: &str) -> bool {
        self.revised.get(topic_id).copied().unwrap_or(false)
    }

    /// Flip the revised flag of a topic and persist the record
    ///
    /// Returns the new flag. On a storage error nothing changes.
    pub fn toggle_revised(&mut self, topic_id: &str) -> Result<bool, StorageError> {
        let value = !self.is_revised(topic_id);

        let mut next = self.revised.clone();
        next.insert(topic_id.to_string(), value);
        self.persist(&next)?;
        self.revised = next;

        tracing::debug!("Topic {} revised = {}", topic_id, value);
        Ok(value)
    }

    /// Forget all progress
    pub fn reset(&mut self) -> Result<(), StorageError> {
        let empty = BTreeMap::new();
        self.persist(&empty)?;
        self.revised = empty;
        Ok(())
    }

    /// Revised topics that exist in the catalog
    pub fn revised_count(&self, index: &CatalogIndex) -> usize {
        self.revised.iter().filter(|(id, revised)| **revised && index.contains(id)).count()
    }

    /// Share of catalog topics revised, rounded half up
    pub fn percentage(&self, index: &CatalogIndex) -> u8 {
        percentage_of(self.revised_count(index), index.topic_count())
    }

    /// Revised count, total and percentage in one pass
    pub fn summary(&self, index: &CatalogIndex) -> ProgressSummary {
        let revised = self.revised_count(index);
        let total = index.topic_count();
        ProgressSummary { revised, total, percentage: percentage_of(revised, total) }
    }

    /// Give back the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self, record: &BTreeMap<String, bool>) -> Result<(), StorageError> {
        let contents = serde_json::to_string(record)?;
        self.store.set(PROGRESS_KEY, &contents)
    }
}

/// `round(100 * part / whole)` with halves rounded up, 0 for an empty whole
fn percentage_of(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole);
    ((200 * part + whole) / (2 * whole)) as u8
}
