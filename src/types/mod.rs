pub mod identifiers;
pub mod recommendation;

pub use identifiers::CatalogVersion;
pub use recommendation::{
    HealthStatus, RecommendError, RecommendRequest, RecommendResponse, RecommendationResult,
    ScoreDetails, ScoredItem, DEFAULT_MAX_RESULTS,
};
