pub mod catalog;
pub mod reactions;
