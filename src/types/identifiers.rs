use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::catalog::AssessmentItem;

/// Content hash of a catalog snapshot.
///
/// Two snapshots with the same items in the same order share a version, so
/// evaluation numbers can be tied to the exact catalog they were computed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogVersion(String);

impl CatalogVersion {
    pub fn from_items(items: &[AssessmentItem]) -> Result<Self, serde_json::Error> {
        let mut hasher = Sha256::new();

        // Order matters: it defines tie-breaking during ranking.
        // Each item's JSON object is self-delimiting, so no separator is needed.
        for item in items {
            let item_json = serde_json::to_vec(item)?;
            hasher.update(&item_json);
        }

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        Ok(CatalogVersion(format!("sha256:{hex}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
