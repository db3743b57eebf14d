//! Test harness for integration testing.
//!
//! Each test gets a fresh in-memory catalog, a recording platform that knows
//! the test guild, role, member and channel, and a recording audit sink.

use anyhow::{Context, Result};
use chatbot_core::common::{ChannelId, GuildId, MessageId, RoleId, UserId};
use chatbot_core::domains::catalog::CatalogStore;
use chatbot_core::kernel::{BotDeps, MockAuditSink, MockPlatform};
use chatbot_core::{Config, DEFAULT_PIN_EMOJI};
use std::sync::Arc;
use test_context::AsyncTestContext;

use super::fixtures::*;

/// Test harness that owns the catalog, the mocks and the wired dependencies.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let reply = ctx.command("help", &[]).await;
/// }
/// ```
pub struct TestHarness {
    pub catalog: CatalogStore,
    pub platform: MockPlatform,
    pub audit: MockAuditSink,
    pub deps: BotDeps,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.catalog.pool().close().await;
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        Self::with_platform(default_platform()).await
    }

    /// Harness around a custom platform mock (missing entities, forced failures)
    pub async fn with_platform(platform: MockPlatform) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let catalog = CatalogStore::in_memory()
            .await
            .context("Failed to open in-memory catalog")?;
        let audit = MockAuditSink::new();

        let deps = BotDeps::new(
            guild_id(),
            catalog.clone(),
            Arc::new(platform.clone()),
            Arc::new(audit.clone()),
            test_config().reaction_rules(),
        );

        Ok(Self {
            catalog,
            platform,
            audit,
            deps,
        })
    }

    /// Run a command the way the event handler does
    pub async fn command(
        &self,
        name: &str,
        options: &[(&str, &str)],
    ) -> chatbot_core::common::CommandReply {
        let options: Vec<(String, String)> = options
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        chatbot_core::bot::commands::handle(name, &options, USER_NAME, &self.deps).await
    }
}

pub fn test_config() -> Config {
    Config {
        bot_token: "test-token".to_string(),
        guild_id: guild_id(),
        roles_message_id: MessageId::new(MEMBERSHIP_MESSAGE).unwrap(),
        logs_channel_id: ChannelId::new(LOGS_CHANNEL).unwrap(),
        role_emojis: [
            (YELLOW.to_string(), RoleId::new(YELLOW_ROLE).unwrap()),
            (BLUE.to_string(), RoleId::new(BLUE_ROLE).unwrap()),
        ]
        .into_iter()
        .collect(),
        pin_emojis: vec![DEFAULT_PIN_EMOJI.to_string()],
    }
}

pub fn default_platform() -> MockPlatform {
    MockPlatform::new()
        .with_guild(guild_id())
        .with_role(RoleId::new(YELLOW_ROLE).unwrap())
        .with_role(RoleId::new(BLUE_ROLE).unwrap())
        .with_member(UserId::new(USER).unwrap(), USER_NAME)
        .with_channel(ChannelId::new(CHANNEL).unwrap())
        .with_message(ChannelId::new(CHANNEL).unwrap(), MessageId::new(MEMBERSHIP_MESSAGE).unwrap())
        .with_message(ChannelId::new(CHANNEL).unwrap(), MessageId::new(OTHER_MESSAGE).unwrap())
}

fn guild_id() -> GuildId {
    GuildId::new(GUILD).unwrap()
}
