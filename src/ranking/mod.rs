pub mod rules;
pub mod scoring;
pub mod semantic;
pub mod signals;

use crate::catalog::AssessmentItem;
use crate::types::{RecommendationResult, ScoredItem};
pub use rules::{RoleRule, ScoreWeights, ScoringRules};
pub use scoring::{LexicalScorer, Scorer};
pub use semantic::SemanticRanker;
pub use signals::{QuerySignals, RulesError, SignalExtractor};

/// Deterministic ranker: no external calls, never fails.
#[derive(Debug, Clone)]
pub struct RuleBasedRanker<S = LexicalScorer> {
    extractor: SignalExtractor,
    scorer: S,
}

impl Default for RuleBasedRanker<LexicalScorer> {
    fn default() -> Self {
        Self {
            extractor: SignalExtractor::default(),
            scorer: LexicalScorer::default(),
        }
    }
}

impl RuleBasedRanker<LexicalScorer> {
    /// Build a ranker from a heuristic table other than v0.
    pub fn from_rules(rules: ScoringRules) -> Result<Self, RulesError> {
        let scorer = LexicalScorer::new(rules.weights);
        let extractor = SignalExtractor::new(rules)?;
        Ok(Self { extractor, scorer })
    }
}

impl<S> RuleBasedRanker<S>
where
    S: Scorer,
{
    pub fn new(extractor: SignalExtractor, scorer: S) -> Self {
        Self { extractor, scorer }
    }

    pub fn extractor(&self) -> &SignalExtractor {
        &self.extractor
    }

    /// Score every item and order them by (score desc, catalog order).
    pub fn score_all<'a>(&self, query: &str, items: &'a [AssessmentItem]) -> Vec<ScoredItem<'a>> {
        let query_lower = query.to_lowercase();
        let signals = self.extractor.extract(&query_lower);
        tracing::debug!(
            max_minutes = ?signals.max_minutes,
            target_minutes = ?signals.target_minutes,
            skills = ?signals.matched_skills,
            roles = ?signals.matched_roles.keys().collect::<Vec<_>>(),
            "extracted query signals"
        );

        // 1. Scoring Phase
        let mut scored: Vec<ScoredItem<'a>> = items
            .iter()
            .map(|item| {
                let details = self.scorer.score(item, &signals, &query_lower);
                let score = self.scorer.score_value(&details);
                ScoredItem {
                    item,
                    score,
                    score_details: details,
                }
            })
            .collect();

        // 2. Ordering Phase
        // sort_by is stable: equal scores keep catalog order
        scored.sort_by(|a, b| b.score.cmp(&a.score));

        debug_assert!(scored.windows(2).all(|w| w[0].score >= w[1].score));

        scored
    }

    /// Top `k` items for `query`.
    pub fn rank(&self, query: &str, items: &[AssessmentItem], k: usize) -> RecommendationResult {
        let scored = self.score_all(query, items);
        RecommendationResult::collect(scored.iter().map(|s| s.item), k)
    }
}
