use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use thiserror::Error;

use crate::ranking::rules::ScoringRules;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Pattern {0:?} has no capture group for the number")]
    MissingCapture(String),
}

/// Structured signals pulled out of one lowercased query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySignals {
    /// Hard ceiling from "under 40 minutes" style phrases.
    pub max_minutes: Option<u32>,
    /// From "about N hours", compared with a tolerance.
    pub target_minutes: Option<u32>,
    pub raw_terms: BTreeSet<String>,
    pub matched_skills: BTreeSet<String>,
    /// Role keyword -> category words to look for in an item.
    pub matched_roles: BTreeMap<String, Vec<String>>,
}

/// Compiled form of a [`ScoringRules`] table.
#[derive(Debug, Clone)]
pub struct SignalExtractor {
    rules: ScoringRules,
    ceiling: Vec<Regex>,
    hour: Vec<Regex>,
}

impl SignalExtractor {
    pub fn new(rules: ScoringRules) -> Result<Self, RulesError> {
        let ceiling = compile_all(&rules.ceiling_patterns)?;
        let hour = compile_all(&rules.hour_patterns)?;
        Ok(Self {
            rules,
            ceiling,
            hour,
        })
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Extract signals from an already-lowercased query. Never fails: a
    /// pattern that does not match leaves its field unset.
    pub fn extract(&self, query_lower: &str) -> QuerySignals {
        let max_minutes = first_number(&self.ceiling, query_lower);
        let target_minutes =
            first_number(&self.hour, query_lower).and_then(|hours| hours.checked_mul(60));

        let raw_terms = query_lower
            .split_whitespace()
            .filter(|term| term.chars().count() >= self.rules.min_term_len)
            .map(str::to_string)
            .collect();

        let matched_skills = self
            .rules
            .technical_skills
            .iter()
            .filter(|skill| query_lower.contains(skill.as_str()))
            .cloned()
            .collect();

        let matched_roles = self
            .rules
            .roles
            .iter()
            .filter(|rule| query_lower.contains(rule.role.as_str()))
            .map(|rule| (rule.role.clone(), rule.keywords.clone()))
            .collect();

        QuerySignals {
            max_minutes,
            target_minutes,
            raw_terms,
            matched_skills,
            matched_roles,
        }
    }
}

impl Default for SignalExtractor {
    fn default() -> Self {
        // v0 patterns are fixed literals covered by tests.
        Self::new(ScoringRules::v0()).expect("v0 scoring rules compile")
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, RulesError> {
    patterns
        .iter()
        .map(|pattern| {
            let re = Regex::new(pattern).map_err(|source| RulesError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            if re.captures_len() < 2 {
                return Err(RulesError::MissingCapture(pattern.clone()));
            }
            Ok(re)
        })
        .collect()
}

/// First pattern that matches wins; a number too large for u32 counts as no
/// match for that pattern.
fn first_number(patterns: &[Regex], text: &str) -> Option<u32> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}
