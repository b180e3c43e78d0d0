use serde::{Deserialize, Serialize};

use crate::backend::gemini::{GeminiConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::fetch::http::DEFAULT_USER_AGENT;
use crate::types::DEFAULT_MAX_RESULTS;

pub const DEFAULT_EVAL_K: usize = 3;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Everything the engine needs from its environment.
///
/// Built once by the process and handed to the recommender; nothing reads
/// the environment after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// `None` means no generative backend: rule-based ranking only.
    pub gemini: Option<GeminiConfig>,
    pub fetch: FetchConfig,
    pub default_max_results: usize,
    pub default_eval_k: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gemini: None,
            fetch: FetchConfig::default(),
            default_max_results: DEFAULT_MAX_RESULTS,
            default_eval_k: DEFAULT_EVAL_K,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, e.g. a map in tests.
    ///
    /// Recognised keys: `GOOGLE_API_KEY`, `GEMINI_MODEL`, `GEMINI_BASE_URL`,
    /// `RECOMMEND_HTTP_TIMEOUT_SECS`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout_secs = match get("RECOMMEND_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "ignoring invalid RECOMMEND_HTTP_TIMEOUT_SECS");
                DEFAULT_HTTP_TIMEOUT_SECS
            }),
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let gemini = get("GOOGLE_API_KEY").map(|api_key| GeminiConfig {
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into()),
            timeout_secs,
            ..GeminiConfig::new(api_key)
        });

        Self {
            gemini,
            fetch: FetchConfig {
                timeout_secs,
                ..FetchConfig::default()
            },
            ..Self::default()
        }
    }
}
