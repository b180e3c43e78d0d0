use serde::{Deserialize, Serialize};

// Hand-tuned keyword tables and score weights.
// Serializable so a table can be shipped as data
// Versioned so evaluation numbers name the table they came from
// Explicit defaults in v0()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub version: String,
    /// Regexes for "at most N minutes", tried in order; group 1 is N.
    pub ceiling_patterns: Vec<String>,
    /// Regexes for "about N hours", tried in order; group 1 is N.
    pub hour_patterns: Vec<String>,
    pub technical_skills: Vec<String>,
    pub roles: Vec<RoleRule>,
    /// Query tokens shorter than this are ignored for term overlap.
    pub min_term_len: usize,
    pub weights: ScoreWeights,
}

/// A role keyword and the category words it looks for in name/type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRule {
    pub role: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skill_match: i32,
    pub role_keyword: i32,
    pub within_ceiling: i32,
    pub over_ceiling: i32,
    pub hour_target: i32,
    pub hour_tolerance_minutes: u32,
    pub exact_duration: i32,
    pub term_overlap: i32,
}

impl ScoringRules {
    pub fn v0() -> Self {
        Self {
            version: "0".into(),
            ceiling_patterns: vec![
                r"(?:less than|under|within|at most|max|maximum)\s+(\d+)\s*(?:min|mins|minutes)".into(),
                r"(?:less than|under|within|at most|max|maximum)\s+(\d+)".into(),
                r"(\d+)\s*(?:min|mins|minutes)\s*(?:or less|maximum|max)".into(),
            ],
            hour_patterns: vec![
                r"(?:about|around|approximately)\s+(\d+)\s*(?:hour|hours)".into(),
                r"(\d+)\s*(?:hour|hours)".into(),
            ],
            technical_skills: ["java", "javascript", "js", "python", "sql", "html", "css", "selenium"]
                .into_iter()
                .map(String::from)
                .collect(),
            roles: vec![
                RoleRule::new("developer", &["technical", "developer", "coding"]),
                RoleRule::new("sales", &["sales", "service"]),
                RoleRule::new("manager", &["management", "leadership"]),
                RoleRule::new("writer", &["content", "writing"]),
                RoleRule::new("qa", &["quality", "testing", "qa"]),
                RoleRule::new("admin", &["administrative", "admin"]),
                RoleRule::new("analyst", &["analyst", "analysis"]),
                RoleRule::new("coo", &["leadership", "management"]),
                RoleRule::new("executive", &["leadership", "management"]),
            ],
            min_term_len: 4,
            weights: ScoreWeights {
                skill_match: 5,
                role_keyword: 3,
                within_ceiling: 5,
                over_ceiling: -10,
                hour_target: 5,
                hour_tolerance_minutes: 15,
                exact_duration: 3,
                term_overlap: 2,
            },
        }
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::v0()
    }
}

impl RoleRule {
    pub fn new(role: &str, keywords: &[&str]) -> Self {
        Self {
            role: role.into(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}
