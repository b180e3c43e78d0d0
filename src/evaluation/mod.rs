pub mod metrics;

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::recommender::Recommender;
use crate::types::{CatalogVersion, DEFAULT_MAX_RESULTS};
pub use metrics::{average_precision_at_k, precision_at_k, recall_at_k};

const BUILTIN_TEST_QUERIES: &str = include_str!("../../data/test_queries.json");

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("Invalid k: {0} (must be at least 1)")]
    InvalidK(usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A labelled query. Relevance is unordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub query: String,
    pub relevant_names: BTreeSet<String>,
}

impl TestCase {
    pub fn new<I, N>(query: impl Into<String>, relevant_names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            query: query.into(),
            relevant_names: relevant_names.into_iter().map(Into::into).collect(),
        }
    }

    /// The labelled hiring queries shipped with the crate.
    pub fn builtin() -> Result<Vec<Self>, EvaluationError> {
        Ok(serde_json::from_str(BUILTIN_TEST_QUERIES)?)
    }

    pub fn load_file(path: &Path) -> Result<Vec<Self>, EvaluationError> {
        let f = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(f))?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEvaluation {
    pub query: String,
    pub recommended: Vec<String>,
    pub recall_at_k: f64,
    pub precision_at_k: f64,
    pub average_precision_at_k: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub mean_recall_at_k: f64,
    pub map_at_k: f64,
    pub k: usize,
    pub num_queries: usize,
    pub catalog_version: CatalogVersion,
    pub queries: Vec<QueryEvaluation>,
}

pub struct Evaluator<'r> {
    recommender: &'r Recommender,
}

impl<'r> Evaluator<'r> {
    pub fn new(recommender: &'r Recommender) -> Self {
        Self { recommender }
    }

    /// Run every case against the full catalog and average the metrics.
    ///
    /// Each query asks for the default 10 results; only the top `k` are
    /// scored.
    pub fn evaluate(
        &self,
        catalog: &Catalog,
        cases: &[TestCase],
        k: usize,
    ) -> Result<EvaluationReport, EvaluationError> {
        if k == 0 {
            return Err(EvaluationError::InvalidK(k));
        }

        let queries: Vec<QueryEvaluation> = cases
            .iter()
            .map(|case| {
                let result = self
                    .recommender
                    .recommend(&case.query, catalog.items(), DEFAULT_MAX_RESULTS);
                let recommended = result.items();
                QueryEvaluation {
                    query: case.query.clone(),
                    recommended: result.names().into_iter().map(String::from).collect(),
                    recall_at_k: recall_at_k(&case.relevant_names, recommended, k),
                    precision_at_k: precision_at_k(&case.relevant_names, recommended, k),
                    average_precision_at_k: average_precision_at_k(&case.relevant_names, recommended, k),
                }
            })
            .collect();

        let mean = |f: fn(&QueryEvaluation) -> f64| {
            if queries.is_empty() {
                0.0
            } else {
                queries.iter().map(f).sum::<f64>() / queries.len() as f64
            }
        };
        let mean_recall_at_k = mean(|q| q.recall_at_k);
        let map_at_k = mean(|q| q.average_precision_at_k);

        tracing::info!(k, num_queries = queries.len(), mean_recall_at_k, map_at_k, "evaluation finished");

        Ok(EvaluationReport {
            mean_recall_at_k,
            map_at_k,
            k,
            num_queries: queries.len(),
            catalog_version: catalog.version.clone(),
            queries,
        })
    }
}
