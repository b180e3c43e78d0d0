//! LLM re-ranking with a deterministic fallback.
//!
//! The backend is untrusted for formatting. Every failure between the prompt
//! and a non-empty list of catalog items (transport error, no JSON object,
//! unparseable JSON, names that resolve to nothing) drops back to the
//! rule-based ranker for the same query.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde::Deserialize;
use thiserror::Error;

use crate::backend::{BackendError, GenerativeBackend};
use crate::catalog::AssessmentItem;
use crate::ranking::{LexicalScorer, RuleBasedRanker, Scorer};
use crate::types::RecommendationResult;

#[derive(Debug, Error)]
enum SemanticError {
    #[error("backend call failed: {0}")]
    Backend(#[from] BackendError),
    #[error("no JSON object in backend response")]
    NoJson,
    #[error("malformed JSON in backend response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("none of {0} recommended names matched the catalog")]
    Unresolved(usize),
}

#[derive(Debug, Deserialize)]
struct Answer {
    #[serde(default)]
    recommendations: Vec<serde_json::Value>,
}

impl Answer {
    /// String entries only; nulls, numbers and objects in the list are skipped.
    fn names(&self) -> Vec<String> {
        self.recommendations
            .iter()
            .filter_map(serde_json::Value::as_str)
            .map(String::from)
            .collect()
    }
}

/// Ways of mapping LLM-returned names onto catalog items, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// `name` equality, in the LLM's order.
    Exact,
    /// Lowercased, "| shl" suffix stripped, containment either way.
    Fuzzy,
}

impl Resolution {
    pub const ORDER: [Resolution; 2] = [Resolution::Exact, Resolution::Fuzzy];

    /// Resolve `names`, or `None` when nothing matched.
    pub fn resolve<'a>(self, names: &[String], items: &'a [AssessmentItem]) -> Option<Vec<&'a AssessmentItem>> {
        let mut seen = BTreeSet::new();
        let mut resolved = Vec::new();

        for name in names {
            match self {
                Resolution::Exact => {
                    if let Some(item) = items.iter().find(|item| &item.name == name) {
                        if seen.insert(item.name.as_str()) {
                            resolved.push(item);
                        }
                    }
                }
                Resolution::Fuzzy => {
                    let wanted = normalize_name(name);
                    if wanted.is_empty() {
                        continue;
                    }
                    for item in items {
                        let candidate = normalize_name(&item.name);
                        if (candidate.contains(&wanted) || wanted.contains(&candidate))
                            && seen.insert(item.name.as_str())
                        {
                            resolved.push(item);
                        }
                    }
                }
            }
        }

        (!resolved.is_empty()).then_some(resolved)
    }
}

pub struct SemanticRanker<'b, S = LexicalScorer> {
    backend: Option<&'b dyn GenerativeBackend>,
    fallback: &'b RuleBasedRanker<S>,
}

impl<'b, S> SemanticRanker<'b, S>
where
    S: Scorer,
{
    pub fn new(backend: Option<&'b dyn GenerativeBackend>, fallback: &'b RuleBasedRanker<S>) -> Self {
        Self { backend, fallback }
    }

    /// Top `k` items for `query`; never fails.
    pub fn rank(&self, query: &str, items: &[AssessmentItem], k: usize) -> RecommendationResult {
        let Some(backend) = self.backend else {
            return self.fallback.rank(query, items, k);
        };

        match try_rank(backend, query, items, k) {
            Ok(result) => {
                tracing::debug!(returned = result.len(), "semantic ranking succeeded");
                result
            }
            Err(err) => {
                tracing::warn!(error = %err, "semantic ranking failed, falling back to rule-based ranking");
                self.fallback.rank(query, items, k)
            }
        }
    }
}

fn try_rank(
    backend: &dyn GenerativeBackend,
    query: &str,
    items: &[AssessmentItem],
    k: usize,
) -> Result<RecommendationResult, SemanticError> {
    let prompt = build_prompt(query, items, k);
    let response = backend.generate(&prompt)?;

    let region = extract_json_object(&response).ok_or(SemanticError::NoJson)?;
    let answer: Answer = serde_json::from_str(region)?;
    let names = answer.names();

    let resolved = Resolution::ORDER
        .iter()
        .find_map(|strategy| strategy.resolve(&names, items))
        .ok_or(SemanticError::Unresolved(answer.recommendations.len()))?;

    Ok(RecommendationResult::collect(resolved, k))
}

/// Prompt listing the whole catalog and asking for a JSON answer.
pub fn build_prompt(query: &str, items: &[AssessmentItem], k: usize) -> String {
    let mut catalog = String::new();
    for item in items {
        let _ = writeln!(
            catalog,
            "Name: {}, Type: {}, Duration: {}",
            item.name, item.test_type, item.duration
        );
    }

    format!(
        r#"You are an expert assistant specializing in pre-employment assessment tests for hiring.

Given the following job description or query:
"{query}"

And this list of available assessments:
{catalog}
Please recommend the most relevant assessments from the list. Follow these guidelines:
1. Respect any duration constraints mentioned in the query (e.g., "less than 30 minutes", "within 45 mins").
2. Focus on technical skills, job roles, and other requirements mentioned.
3. Pay special attention to specific technical skills (Java, Python, JavaScript, SQL, etc.).
4. Consider administrative, sales, or other specialized roles mentioned.

Return your response as a JSON object with exactly this format:
{{"recommendations": ["Full Assessment Name 1", "Full Assessment Name 2"]}}

Only return assessment names that exactly match those in the list above. Include no more than {k} assessments, ordered by relevance to the query.
"#
    )
}

/// First balanced `{...}` region of `text`, ignoring braces inside JSON
/// string literals.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

fn normalize_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let stripped = lower.strip_suffix("| shl").unwrap_or(&lower);
    stripped.trim().to_string()
}
