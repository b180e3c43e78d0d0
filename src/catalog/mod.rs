#[allow(clippy::module_inception)]
pub mod catalog;
pub mod item;
pub mod store;

pub use catalog::{Catalog, CatalogError, CatalogProvider};
pub use item::AssessmentItem;
pub use store::JsonCatalogFile;
