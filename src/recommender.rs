use thiserror::Error;

use crate::backend::{BackendError, GeminiBackend, GenerativeBackend};
use crate::catalog::{AssessmentItem, CatalogProvider};
use crate::config::EngineConfig;
use crate::fetch::{self, HttpPageFetcher, PageFetcher};
use crate::ranking::{RuleBasedRanker, SemanticRanker};
use crate::types::{
    RecommendError, RecommendRequest, RecommendResponse, RecommendationResult, DEFAULT_MAX_RESULTS,
};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Backend setup failed: {0}")]
    Backend(#[from] BackendError),
    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Single entry point for recommendations.
///
/// Holds its collaborators explicitly; two recommenders with different
/// backends can run side by side.
pub struct Recommender {
    ranker: RuleBasedRanker,
    backend: Option<Box<dyn GenerativeBackend>>,
    fetcher: Box<dyn PageFetcher>,
    default_max_results: usize,
}

impl Recommender {
    /// Rule-based recommender using `fetcher` for URL queries.
    pub fn new(fetcher: impl PageFetcher + 'static) -> Self {
        Self {
            ranker: RuleBasedRanker::default(),
            backend: None,
            fetcher: Box::new(fetcher),
            default_max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_backend(mut self, backend: impl GenerativeBackend + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    pub fn with_ranker(mut self, ranker: RuleBasedRanker) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, SetupError> {
        let fetcher = HttpPageFetcher::new(config.fetch.timeout_secs, config.fetch.user_agent.clone())?;
        let mut recommender = Self::new(fetcher);
        recommender.default_max_results = config.default_max_results.max(1);

        if let Some(gemini) = &config.gemini {
            tracing::info!(model = %gemini.model, "semantic ranking enabled");
            recommender = recommender.with_backend(GeminiBackend::new(gemini.clone())?);
        } else {
            tracing::info!("no generative backend configured, using rule-based ranking");
        }
        Ok(recommender)
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn default_max_results(&self) -> usize {
        self.default_max_results
    }

    /// Up to `k` catalog items for `query`, best first.
    ///
    /// A URL query is first replaced by the fetched page text. Backend
    /// problems of any kind degrade to rule-based ranking.
    pub fn recommend(&self, query: &str, items: &[AssessmentItem], k: usize) -> RecommendationResult {
        let query = fetch::normalize(query, self.fetcher.as_ref());

        match &self.backend {
            Some(backend) => SemanticRanker::new(Some(backend.as_ref()), &self.ranker).rank(&query, items, k),
            None => self.ranker.rank(&query, items, k),
        }
    }

    /// Validate a wire request, load the catalog and answer it.
    pub fn handle(
        &self,
        request: RecommendRequest,
        catalog: &dyn CatalogProvider,
    ) -> Result<RecommendResponse, RecommendError> {
        if request.query.trim().is_empty() {
            return Err(RecommendError::EmptyQuery);
        }
        let max_results = match request.max_results {
            Some(0) => return Err(RecommendError::InvalidMaxResults(0)),
            Some(n) => n,
            None => self.default_max_results,
        };

        let catalog = catalog.load()?;
        let result = self.recommend(&request.query, catalog.items(), max_results);

        Ok(RecommendResponse {
            recommendations: result.into_items(),
            query: request.query,
        })
    }
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("has_backend", &self.has_backend())
            .field("default_max_results", &self.default_max_results)
            .finish_non_exhaustive()
    }
}
