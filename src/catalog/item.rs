use serde::{Deserialize, Serialize};

/// One entry of the assessment catalog.
///
/// `name` is the identity key: matching, deduplication and evaluation all
/// compare names, never URLs. Field names on the wire follow the catalog
/// JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentItem {
    pub name: String,
    pub url: String,
    #[serde(rename = "remoteTestingSupport")]
    pub remote_testing_support: bool,
    #[serde(rename = "adaptiveIRTSupport")]
    pub adaptive_irt_support: bool,
    /// "<integer> minutes"
    pub duration: String,
    /// Free-text category label, may hold several words ("Sales Technical").
    #[serde(rename = "testType")]
    pub test_type: String,
}

impl AssessmentItem {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        duration: impl Into<String>,
        test_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            remote_testing_support: true,
            adaptive_irt_support: false,
            duration: duration.into(),
            test_type: test_type.into(),
        }
    }

    /// Parsed duration in minutes, or `None` when the duration string is not
    /// "<integer> <min-unit>".
    pub fn duration_minutes(&self) -> Option<u32> {
        parse_minutes(&self.duration)
    }
}

pub(crate) fn parse_minutes(duration: &str) -> Option<u32> {
    let mut parts = duration.split_whitespace();
    let minutes = parts.next()?.parse().ok()?;
    let unit = parts.next()?.to_lowercase();
    unit.starts_with("min").then_some(minutes)
}
