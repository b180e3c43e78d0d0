// A Catalog is a read-only snapshot:
// no mutation
// no "update" methods
// ranking borrows its items

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::catalog::item::AssessmentItem;
use crate::types::identifiers::CatalogVersion;

const BUILTIN_CATALOG: &str = include_str!("../../data/assessments.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Duplicate assessment name: {0}")]
    DuplicateName(String),
    #[error("Invalid duration {duration:?} for assessment {name}")]
    InvalidDuration { name: String, duration: String },
}

/// Source of the current assessment list.
///
/// Item order is significant: equal scores keep catalog order.
pub trait CatalogProvider {
    fn load(&self) -> Result<Catalog, CatalogError>;
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub version: CatalogVersion,
    pub loaded_at: DateTime<Utc>, // informational only
    items: Vec<AssessmentItem>,
}

impl Catalog {
    /// Validate and snapshot a list of items.
    ///
    /// Names must be unique and every duration must parse as
    /// "<integer> minutes".
    pub fn new(items: Vec<AssessmentItem>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for item in &items {
            if !seen.insert(item.name.as_str()) {
                return Err(CatalogError::DuplicateName(item.name.clone()));
            }
            if item.duration_minutes().is_none() {
                return Err(CatalogError::InvalidDuration {
                    name: item.name.clone(),
                    duration: item.duration.clone(),
                });
            }
        }

        Ok(Self {
            version: CatalogVersion::from_items(&items)?,
            loaded_at: Utc::now(),
            items,
        })
    }

    /// The seed catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<AssessmentItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    pub fn items(&self) -> &[AssessmentItem] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&AssessmentItem> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogProvider for Catalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        Ok(self.clone())
    }
}
