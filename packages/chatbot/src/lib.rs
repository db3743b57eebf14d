// Chatbot - resource catalog and reaction roles for a Discord guild
//
// The catalog indexes categorized links behind slash commands; reactions on a
// configured message grant or revoke roles, and recognized emojis elsewhere
// pin or unpin the message.

pub mod bot;
pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
