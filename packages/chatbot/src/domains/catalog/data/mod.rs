pub mod categories;

pub use categories::{label_for, CategoryEntry, CATEGORIES};
