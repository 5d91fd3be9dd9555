//! Flattened view of the catalog
//!
//! The index owns the catalog and precomputes, once, the depth-first order of
//! topics as `(category, topic)` slot pairs. Every flattened sequence and
//! navigation lookup is derived from that order, so repeated calls always
//! agree with each other.

use std::collections::HashMap;

use super::model::{Catalog, Category, Question, Topic};

/// Position of a topic inside the catalog tree
#[derive(Debug, Clone, Copy)]
struct TopicSlot {
    category: usize,
    topic: usize,
}

/// A topic together with the category that contains it
#[derive(Debug, Clone, Copy)]
pub struct FlatTopicEntry<'a> {
    pub topic: &'a Topic,
    pub category: &'a Category,
}

impl PartialEq for FlatTopicEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.topic.id == other.topic.id && self.category.id == other.category.id
    }
}

impl Eq for FlatTopicEntry<'_> {}

/// A practice question annotated with the title of its topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatQuestion<'a> {
    pub question: &'a Question,
    pub topic_title: &'a str,
}

/// A topic and its neighbours in flattened order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub prev: Option<FlatTopicEntry<'a>>,
    pub current: FlatTopicEntry<'a>,
    pub next: Option<FlatTopicEntry<'a>>,
}

/// Read-only catalog with a precomputed flat topic order
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    catalog: Catalog,
    order: Vec<TopicSlot>,
    positions: HashMap<String, usize>,
}

impl CatalogIndex {
    /// Build the index for a catalog
    pub fn new(catalog: Catalog) -> Self {
        let mut order = Vec::with_capacity(catalog.topic_count());
        let mut positions = HashMap::with_capacity(catalog.topic_count());

        for (category_idx, category) in catalog.categories.iter().enumerate() {
            for (topic_idx, topic) in category.topics.iter().enumerate() {
                // First occurrence wins if the content repeats an id
                positions.entry(topic.id.clone()).or_insert(order.len());
                order.push(TopicSlot { category: category_idx, topic: topic_idx });
            }
        }

        tracing::debug!(
            "Indexed {} topics across {} categories",
            order.len(),
            catalog.categories.len()
        );

        Self { catalog, order, positions }
    }

    /// The underlying catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Number of topics in the catalog
    pub fn topic_count(&self) -> usize {
        self.order.len()
    }

    /// All topics, category by category, in declaration order
    pub fn flatten_topics(&self) -> Vec<FlatTopicEntry<'_>> {
        self.iter_topics().collect()
    }

    /// Iterate topics in flattened order without collecting
    pub fn iter_topics(&self) -> impl Iterator<Item = FlatTopicEntry<'_>> + '_ {
        self.order.iter().map(|slot| self.entry(*slot))
    }

    /// All practice questions in flattened topic order
    pub fn flatten_questions(&self) -> Vec<FlatQuestion<'_>> {
        self.iter_topics()
            .flat_map(|entry| {
                entry.topic.practice_questions.iter().map(move |question| FlatQuestion {
                    question,
                    topic_title: entry.topic.title.as_str(),
                })
            })
            .collect()
    }

    /// Whether a topic id exists in the catalog
    pub fn contains(&self, topic_id: &str) -> bool {
        self.positions.contains_key(topic_id)
    }

    /// Position of a topic in flattened order
    pub fn position(&self, topic_id: &str) -> Option<usize> {
        self.positions.get(topic_id).copied()
    }

    /// Look up a topic by id
    pub fn find(&self, topic_id: &str) -> Option<FlatTopicEntry<'_>> {
        self.position(topic_id).map(|pos| self.entry(self.order[pos]))
    }

    /// Topic at a flattened position
    pub fn get(&self, position: usize) -> Option<FlatTopicEntry<'_>> {
        self.order.get(position).map(|slot| self.entry(*slot))
    }

    /// Previous and next topics for prev/next navigation
    ///
    /// Returns `None` when the id is not in the catalog.
    pub fn neighbors(&self, topic_id: &str) -> Option<Neighbors<'_>> {
        let pos = self.position(topic_id)?;
        Some(Neighbors {
            prev: pos.checked_sub(1).and_then(|p| self.get(p)),
            current: self.get(pos)?,
            next: self.get(pos + 1),
        })
    }

    /// Look up a category by id
    pub fn find_category(&self, category_id: &str) -> Option<&Category> {
        self.catalog.categories.iter().find(|c| c.id == category_id)
    }

    /// Entry point into a category (its first topic)
    pub fn first_topic_of(&self, category_id: &str) -> Option<FlatTopicEntry<'_>> {
        let category = self.find_category(category_id)?;
        let topic = category.topics.first()?;
        Some(FlatTopicEntry { topic, category })
    }

    fn entry(&self, slot: TopicSlot) -> FlatTopicEntry<'_> {
        let category = &self.catalog.categories[slot.category];
        FlatTopicEntry { topic: &category.topics[slot.topic], category }
    }
}

impl From<Catalog> for CatalogIndex {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn q(text: &str) -> Question {
        Question::new(text, ["A", "B", "C"], "B")
    }

    fn sample_index() -> CatalogIndex {
        CatalogIndex::new(Catalog::new(vec![
            Category::new("html", "HTML", "📄")
                .with_topic(Topic::new("html-tags", "Tags", "").with_question(q("h1")))
                .with_topic(
                    Topic::new("html-lists", "Lists", "").with_question(q("h2")).with_question(q("h3")),
                ),
            Category::new("empty", "Nothing Yet", "∅"),
            Category::new("css", "CSS", "🎨")
                .with_topic(Topic::new("css-box", "Box Model", "").with_question(q("c1"))),
        ]))
    }

    fn ids(entries: &[FlatTopicEntry<'_>]) -> Vec<String> {
        entries.iter().map(|e| e.topic.id.clone()).collect()
    }

    #[test]
    fn flatten_topics_is_depth_first_declaration_order() {
        let index = sample_index();
        assert_eq!(ids(&index.flatten_topics()), vec!["html-tags", "html-lists", "css-box"]);
    }

    #[test]
    fn flatten_topics_carries_owning_category() {
        let index = sample_index();
        let flat = index.flatten_topics();
        assert_eq!(flat[0].category.id, "html");
        assert_eq!(flat[1].category.id, "html");
        assert_eq!(flat[2].category.id, "css");
    }

    #[test]
    fn flatten_topics_is_deterministic() {
        let index = sample_index();
        assert_eq!(index.flatten_topics(), index.flatten_topics());
    }

    #[test]
    fn flatten_questions_follows_topic_order() {
        let index = sample_index();
        let questions: Vec<(&str, &str)> = index
            .flatten_questions()
            .iter()
            .map(|fq| (fq.question.question.as_str(), fq.topic_title))
            .collect();

        assert_eq!(
            questions,
            vec![("h1", "Tags"), ("h2", "Lists"), ("h3", "Lists"), ("c1", "Box Model")]
        );
    }

    #[test]
    fn neighbors_at_boundaries() {
        let index = sample_index();

        let first = index.neighbors("html-tags").unwrap();
        assert!(first.prev.is_none());
        assert_eq!(first.next.unwrap().topic.id, "html-lists");

        let last = index.neighbors("css-box").unwrap();
        assert_eq!(last.prev.unwrap().topic.id, "html-lists");
        assert!(last.next.is_none());
    }

    #[test]
    fn neighbors_cross_category_boundaries() {
        let index = sample_index();
        let middle = index.neighbors("html-lists").unwrap();
        assert_eq!(middle.prev.unwrap().topic.id, "html-tags");
        assert_eq!(middle.current.topic.id, "html-lists");
        assert_eq!(middle.next.unwrap().topic.id, "css-box");
    }

    #[test]
    fn neighbors_of_unknown_topic_is_none() {
        let index = sample_index();
        assert!(index.neighbors("nope").is_none());
        assert!(index.find("nope").is_none());
        assert!(!index.contains("nope"));
    }

    #[test]
    fn interior_neighbors_are_adjacent_by_position() {
        let index = sample_index();
        let flat = index.flatten_topics();
        for (i, entry) in flat.iter().enumerate() {
            let n = index.neighbors(&entry.topic.id).unwrap();
            assert_eq!(n.prev, i.checked_sub(1).map(|p| flat[p]));
            assert_eq!(n.next, flat.get(i + 1).copied());
        }
    }

    #[test]
    fn first_topic_of_category() {
        let index = sample_index();
        assert_eq!(index.first_topic_of("css").unwrap().topic.id, "css-box");
        assert!(index.first_topic_of("empty").is_none());
        assert!(index.first_topic_of("missing").is_none());
    }

    #[test]
    fn first_topic_of_is_the_category_start_in_flat_order() {
        let index = sample_index();
        for category in &index.catalog().categories {
            let expected = index.iter_topics().find(|e| e.category.id == category.id);
            assert_eq!(index.first_topic_of(&category.id), expected);
        }
    }

    #[test]
    fn empty_catalog_has_no_topics() {
        let index = CatalogIndex::new(Catalog::default());
        assert_eq!(index.topic_count(), 0);
        assert!(index.flatten_topics().is_empty());
        assert!(index.flatten_questions().is_empty());
    }
}
