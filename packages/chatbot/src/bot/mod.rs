// Discord bot setup (gateway client, slash commands, event handler)
pub mod app;
pub mod commands;
pub mod formatting;
pub mod handler;

pub use app::*;
pub use handler::Handler;
