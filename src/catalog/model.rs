//! Content model for the study catalog
//!
//! A catalog is an ordered list of categories, each holding an ordered list of
//! topics. Topics carry their reference material and a small bank of practice
//! questions. The whole tree is read-only once loaded.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Sample catalog compiled into the binary
const BUNDLED_CATALOG: &str = include_str!("../../content/catalog.json");

/// A complete study catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Categories in display order
    pub categories: Vec<Category>,
    /// Day-by-day revision plan
    #[serde(default)]
    pub revision_plan: RevisionPlan,
    /// Free-form interview questions with model answers
    #[serde(default)]
    pub interview_questions: Vec<InterviewQuestion>,
    /// Hands-on exercises
    #[serde(default)]
    pub practice_tasks: Vec<PracticeTask>,
    /// Compact reference cards
    #[serde(default)]
    pub cheatsheets: Vec<Cheatsheet>,
}

impl Catalog {
    /// Create a catalog from categories only
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories, ..Default::default() }
    }

    /// Parse a catalog from JSON without validating it
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load and validate a catalog file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        let catalog = Self::parse_validated(&contents)?;
        tracing::debug!(
            "Loaded catalog from {:?} ({} topics)",
            path,
            catalog.topic_count()
        );
        Ok(catalog)
    }

    /// The catalog shipped with the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::parse_validated(BUNDLED_CATALOG)
    }

    fn parse_validated(json: &str) -> Result<Self, CatalogError> {
        let catalog = Self::from_json_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Total topic count across all categories
    pub fn topic_count(&self) -> usize {
        self.categories.iter().map(|c| c.topics.len()).sum()
    }

    /// Check the content rules the engines rely on
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut category_ids = HashSet::new();
        let mut topic_ids = HashSet::new();

        for category in &self.categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
            for topic in &category.topics {
                if !topic_ids.insert(topic.id.as_str()) {
                    return Err(CatalogError::Invalid(format!(
                        "duplicate topic id '{}'",
                        topic.id
                    )));
                }
                for question in &topic.practice_questions {
                    question.validate().map_err(|reason| {
                        CatalogError::Invalid(format!("topic '{}': {}", topic.id, reason))
                    })?;
                }
            }
        }

        Ok(())
    }
}

/// A group of related topics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Emoji or short glyph shown next to the title
    pub icon: String,
    /// Topics in order
    pub topics: Vec<Topic>,
}

impl Category {
    /// Create an empty category
    pub fn new(id: impl Into<String>, title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), icon: icon.into(), topics: Vec::new() }
    }

    /// Append a topic
    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topics.push(topic);
        self
    }
}

/// A single unit of study
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Unique identifier across the whole catalog
    pub id: String,
    /// Display title
    pub title: String,
    /// One-paragraph definition
    pub definition: String,
    /// Why the learner should care
    pub why_it_matters: String,
    /// Syntax snippets
    #[serde(default)]
    pub syntax: Vec<String>,
    /// Worked examples
    #[serde(default)]
    pub examples: Vec<String>,
    /// Pitfalls, when the author listed any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_mistakes: Option<Vec<String>>,
    /// Short bullet-point summary
    #[serde(default)]
    pub recap: Vec<String>,
    /// Multiple-choice questions
    #[serde(default)]
    pub practice_questions: Vec<Question>,
}

impl Topic {
    /// Create a topic with a title and definition and no other material
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            definition: definition.into(),
            why_it_matters: String::new(),
            syntax: Vec::new(),
            examples: Vec::new(),
            common_mistakes: None,
            recap: Vec::new(),
            practice_questions: Vec::new(),
        }
    }

    /// Set the recap lines
    pub fn with_recap<I, S>(mut self, recap: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recap = recap.into_iter().map(Into::into).collect();
        self
    }

    /// Append a practice question
    pub fn with_question(mut self, question: Question) -> Self {
        self.practice_questions.push(question);
        self
    }
}

/// A multiple-choice question
///
/// Options are shown in the order given. The answer is compared to options
/// by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question text
    pub question: String,
    /// Candidate answers, in display order
    pub options: Vec<String>,
    /// The correct option
    pub answer: String,
}

impl Question {
    /// Smallest and largest number of options a question may offer
    pub const OPTION_RANGE: std::ops::RangeInclusive<usize> = 3..=4;

    /// Create a question
    pub fn new<I, S>(question: impl Into<String>, options: I, answer: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            answer: answer.into(),
        }
    }

    /// Whether the given option is the answer
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }

    fn validate(&self) -> Result<(), String> {
        if !Self::OPTION_RANGE.contains(&self.options.len()) {
            return Err(format!(
                "question '{}' has {} options, expected 3 or 4",
                self.question,
                self.options.len()
            ));
        }
        if !self.options.contains(&self.answer) {
            return Err(format!(
                "answer '{}' is not one of the options of '{}'",
                self.answer, self.question
            ));
        }
        Ok(())
    }
}

/// One day of the revision plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDay {
    /// Day number (1-indexed)
    pub day: u32,
    /// Theme of the day
    pub title: String,
    /// Topics to cover
    pub topic_ids: Vec<String>,
}

/// Ordered days of the revision plan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionPlan(Vec<PlanDay>);

impl RevisionPlan {
    pub fn new(days: Vec<PlanDay>) -> Self {
        Self(days)
    }

    /// Days in declaration order
    pub fn days(&self) -> &[PlanDay] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An open interview question with a model answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub answer: String,
    /// Where the question came from
    pub source: String,
}

/// A coding exercise with a hint and a reference solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeTask {
    pub title: String,
    pub description: String,
    pub hint: String,
    pub solution: String,
}

/// A titled reference card of one-line reminders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cheatsheet {
    pub title: String,
    pub items: Vec<String>,
}
