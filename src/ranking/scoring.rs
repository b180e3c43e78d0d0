use crate::catalog::AssessmentItem;
use crate::ranking::rules::ScoreWeights;
use crate::ranking::signals::QuerySignals;
use crate::types::ScoreDetails;

pub trait Scorer {
    fn score(&self, item: &AssessmentItem, signals: &QuerySignals, query_lower: &str) -> ScoreDetails;

    fn score_value(&self, details: &ScoreDetails) -> i32 {
        details.total()
    }
}

/// v0: additive keyword and duration heuristics.
///
/// Scores are only meaningful relative to other items scored against the
/// same query; nothing is normalised or clamped.
#[derive(Debug, Clone, Copy)]
pub struct LexicalScorer {
    weights: ScoreWeights,
}

impl LexicalScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }
}

impl Default for LexicalScorer {
    fn default() -> Self {
        Self::new(crate::ranking::rules::ScoringRules::v0().weights)
    }
}

impl Scorer for LexicalScorer {
    fn score(&self, item: &AssessmentItem, signals: &QuerySignals, query_lower: &str) -> ScoreDetails {
        let w = &self.weights;
        let name_lower = item.name.to_lowercase();
        let type_lower = item.test_type.to_lowercase();
        let is_technical = type_lower.contains("technical");

        let mut details = ScoreDetails::default();

        for skill in &signals.matched_skills {
            if is_technical || name_lower.contains(skill.as_str()) {
                details.skills += w.skill_match;
            }
        }

        // One bonus per category word hit, so a role can contribute more than once.
        for keywords in signals.matched_roles.values() {
            for keyword in keywords {
                if type_lower.contains(keyword.as_str()) || name_lower.contains(keyword.as_str()) {
                    details.roles += w.role_keyword;
                }
            }
        }

        // Unparseable durations contribute nothing duration-based.
        if let Some(minutes) = item.duration_minutes() {
            if let Some(max) = signals.max_minutes {
                details.duration_ceiling = if minutes <= max {
                    w.within_ceiling
                } else {
                    w.over_ceiling
                };
            }

            if let Some(target) = signals.target_minutes {
                if minutes.abs_diff(target) <= w.hour_tolerance_minutes {
                    details.hour_target = w.hour_target;
                }
            }

            if query_lower.contains(&format!("{minutes} minutes"))
                || query_lower.contains(&format!("{minutes} mins"))
            {
                details.exact_duration = w.exact_duration;
            }
        }

        let overlap = signals
            .raw_terms
            .iter()
            .filter(|term| name_lower.contains(term.as_str()))
            .count() as i32;
        details.term_overlap = overlap * w.term_overlap;

        details
    }
}
