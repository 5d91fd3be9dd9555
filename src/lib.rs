//! revise - a study reference with mastery tracking, search and quizzes
//!
//! The catalog of categories and topics is loaded once and indexed into a flat
//! order. On top of that index sit the progress store, the catalog search and
//! the random quiz engine.

pub mod catalog;
pub mod config;
pub mod error;
pub mod planner;
pub mod quiz;
pub mod search;
pub mod storage;

pub use catalog::{Catalog, CatalogIndex, FlatQuestion, FlatTopicEntry};
pub use config::{Config, ProgressStore, ThemeMode};
pub use planner::DayStatus;
pub use quiz::{OptionMark, QuizSession, Score, SelectOutcome};
pub use search::{SEARCH_RESULT_LIMIT, search};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
