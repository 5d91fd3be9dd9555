//! Day-by-day revision plan

use crate::catalog::{CatalogIndex, FlatTopicEntry, PlanDay};
use crate::config::ProgressStore;
use crate::storage::KeyValueStore;

/// How far a plan day has got
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    NotStarted,
    Partial,
    Complete,
}

impl PlanDay {
    /// Topics of this day that exist in the catalog, in catalog order
    pub fn topics<'a>(&self, index: &'a CatalogIndex) -> Vec<FlatTopicEntry<'a>> {
        index
            .iter_topics()
            .filter(|entry| self.topic_ids.iter().any(|id| *id == entry.topic.id))
            .collect()
    }

    /// Progress of this day from the revised flags of its topics
    ///
    /// A day none of whose topics exist any more counts as not started.
    pub fn status<S: KeyValueStore>(
        &self,
        index: &CatalogIndex,
        progress: &ProgressStore<S>,
    ) -> DayStatus {
        let topics = self.topics(index);
        let revised = topics.iter().filter(|e| progress.is_revised(&e.topic.id)).count();

        match revised {
            0 => DayStatus::NotStarted,
            n if n == topics.len() => DayStatus::Complete,
            _ => DayStatus::Partial,
        }
    }
}
