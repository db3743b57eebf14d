//! Catalog domain - categorized resource links

pub mod actions;
pub mod data;
pub mod errors;
pub mod models;
pub mod store;

pub use data::{label_for, CategoryEntry, CATEGORIES};
pub use errors::{CatalogError, CatalogResult};
pub use models::{Category, Resource};
pub use store::{is_web_url, CatalogStore};
