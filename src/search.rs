//! Catalog search
//!
//! Case-insensitive substring search over topic titles, definitions, recap
//! lines and category titles. Matching only decides inclusion: results keep
//! the flattened catalog order and are capped for interactive display.

use crate::catalog::{CatalogIndex, FlatTopicEntry};

/// Maximum number of results returned by a search
pub const SEARCH_RESULT_LIMIT: usize = 8;

/// Find topics matching a free-text query
///
/// A blank query returns nothing. The query is matched as a single literal
/// substring, so multi-word queries are not split into terms.
pub fn search<'a>(index: &'a CatalogIndex, query: &str) -> Vec<FlatTopicEntry<'a>> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let results: Vec<_> = index
        .iter_topics()
        .filter(|entry| matches(entry, &needle))
        .take(SEARCH_RESULT_LIMIT)
        .collect();

    tracing::debug!("Search {:?} matched {} topics", query, results.len());
    results
}

/// Whether an entry contains the (already lowercased) needle in any searched field
fn matches(entry: &FlatTopicEntry<'_>, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);

    contains(&entry.topic.title)
        || contains(&entry.topic.definition)
        || entry.topic.recap.iter().any(|line| contains(line))
        || contains(&entry.category.title)
}
