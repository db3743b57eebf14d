//! Catalog domain actions - command handlers
//!
//! Each action takes the parsed command arguments and the bot dependencies and
//! always produces a reply; errors are turned into replies here.

mod mutations;
mod queries;

pub use mutations::add_resource;
pub use queries::get_resources;
