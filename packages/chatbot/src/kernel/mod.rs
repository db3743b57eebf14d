//! Kernel module - bot infrastructure and dependencies.

pub mod audit;
pub mod deps;
pub mod discord;
pub mod test_dependencies;
pub mod traits;

pub use audit::audit_log;
pub use deps::BotDeps;
pub use discord::{normalize_reaction, ChannelAuditSink, DiscordPlatform};
pub use test_dependencies::{MockAuditSink, MockOperation, MockPlatform, PlatformCall};
pub use traits::*;
