//! Hybrid assessment recommendation engine.
//!
//! `recommend-core` ranks a fixed catalog of assessments against a free-text
//! hiring query, a pasted job description or a job-posting URL. A
//! deterministic keyword and duration scorer does the ranking on its own, or
//! backs up an LLM re-ranker whenever that one fails. The `evaluation`
//! module scores ranking quality with Recall@K and MAP@K.

pub mod backend;
pub mod catalog;
pub mod config;
pub mod evaluation;
pub mod fetch;
pub mod ranking;
pub mod recommender;
pub mod types;

pub use catalog::{AssessmentItem, Catalog, CatalogProvider};
pub use recommender::Recommender;
