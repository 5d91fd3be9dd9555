//! Study catalog: content model and flattened index

pub mod index;
pub mod model;

pub use index::{CatalogIndex, FlatQuestion, FlatTopicEntry, Neighbors};
pub use model::{
    Catalog, Category, Cheatsheet, InterviewQuestion, PlanDay, PracticeTask, Question,
    RevisionPlan, Topic,
};
