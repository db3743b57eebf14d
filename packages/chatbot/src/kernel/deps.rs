//! Bot dependencies shared by every event and command handler
//!
//! Built once at startup and cloned into each handler invocation. All external
//! services sit behind trait objects so tests can inject mocks; the audit sink
//! destination is fixed here rather than looked up from global state.

use std::sync::Arc;

use crate::common::GuildId;
use crate::domains::catalog::CatalogStore;
use crate::domains::reactions::{ReactionExecutor, ReactionRules};
use crate::kernel::{BaseAuditSink, BasePlatform};

#[derive(Clone)]
pub struct BotDeps {
    /// The single guild this deployment serves
    pub guild_id: GuildId,
    pub catalog: CatalogStore,
    pub platform: Arc<dyn BasePlatform>,
    pub audit: Arc<dyn BaseAuditSink>,
    pub rules: Arc<ReactionRules>,
}

impl BotDeps {
    pub fn new(
        guild_id: GuildId,
        catalog: CatalogStore,
        platform: Arc<dyn BasePlatform>,
        audit: Arc<dyn BaseAuditSink>,
        rules: ReactionRules,
    ) -> Self {
        Self {
            guild_id,
            catalog,
            platform,
            audit,
            rules: Arc::new(rules),
        }
    }

    /// Reaction executor wired to these dependencies
    pub fn reaction_executor(&self) -> ReactionExecutor {
        ReactionExecutor::new(
            self.platform.clone(),
            self.audit.clone(),
            self.rules.clone(),
        )
    }
}
