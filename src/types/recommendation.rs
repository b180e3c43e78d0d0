use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::AssessmentItem;

/// Default number of recommendations when the caller does not ask for one.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Request body of the recommendation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
}

impl RecommendRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: None,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

/// Response body of the recommendation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<AssessmentItem>,
    pub query: String,
}

/// Body of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "OK".into(),
            message: "API is running".into(),
        }
    }
}

/// Ordered, name-unique list of recommended items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationResult(Vec<AssessmentItem>);

impl RecommendationResult {
    /// Keep the first occurrence of every name, stopping at `max` items.
    pub fn collect<'a, I>(items: I, max: usize) -> Self
    where
        I: IntoIterator<Item = &'a AssessmentItem>,
    {
        let mut seen = BTreeSet::new();
        let picked = items
            .into_iter()
            .filter(|item| seen.insert(item.name.as_str()))
            .take(max)
            .cloned()
            .collect();
        Self(picked)
    }

    pub fn items(&self) -> &[AssessmentItem] {
        &self.0
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|item| item.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_items(self) -> Vec<AssessmentItem> {
        self.0
    }
}

/// An item that has been scored but not yet cut to `k`.
/// Holds a reference to the catalog entry to avoid cloning prematurely.
#[derive(Debug, Clone)]
pub struct ScoredItem<'a> {
    pub item: &'a AssessmentItem,

    pub score: i32,
    pub score_details: ScoreDetails,
}

/// Per-contribution breakdown of a lexical score.
///
/// Every field is an independent additive term; `total` is their sum and may
/// be negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub skills: i32,
    pub roles: i32,
    pub duration_ceiling: i32,
    pub hour_target: i32,
    pub exact_duration: i32,
    pub term_overlap: i32,
}

impl ScoreDetails {
    pub fn total(&self) -> i32 {
        self.skills
            + self.roles
            + self.duration_ceiling
            + self.hour_target
            + self.exact_duration
            + self.term_overlap
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("Query must not be empty")]
    EmptyQuery,

    #[error("Invalid max_results: {0} (must be at least 1)")]
    InvalidMaxResults(usize),

    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),
}
