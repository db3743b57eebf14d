//! Integration tests for the reaction pipeline.
//!
//! Runs normalized reaction events through the executor wired by `BotDeps`
//! against the recording platform and audit sink.

mod common;

use crate::common::*;
use chatbot_core::common::{MessageId, RoleId, UserId};
use chatbot_core::domains::reactions::ReactionOutcome;
use chatbot_core::kernel::{MockOperation, MockPlatform, PlatformCall};
use chatbot_core::kernel::PlatformErrorKind;
use test_context::test_context;

fn yellow_role() -> RoleId {
    RoleId::new(YELLOW_ROLE).unwrap()
}

fn user() -> UserId {
    UserId::new(USER).unwrap()
}

// =============================================================================
// Role grant / revoke
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn role_emoji_on_membership_message_grants_role(ctx: &TestHarness) {
    let executor = ctx.deps.reaction_executor();

    let outcome = executor
        .process(&reaction_added(YELLOW, MEMBERSHIP_MESSAGE))
        .await;

    assert_eq!(
        outcome,
        Some(ReactionOutcome::RoleGranted {
            user_id: user(),
            role_id: yellow_role(),
        })
    );
    assert_eq!(ctx.platform.mutation_calls().len(), 1);
    assert!(ctx.platform.holds_role(user(), yellow_role()));
    assert!(ctx.audit.lines().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn duplicate_reaction_add_is_not_an_error(ctx: &TestHarness) {
    let executor = ctx.deps.reaction_executor();
    let event = reaction_added(YELLOW, MEMBERSHIP_MESSAGE);

    executor.process(&event).await;
    assert_eq!(ctx.platform.mutation_calls().len(), 1);

    let second = executor.process(&event).await;

    assert!(matches!(second, Some(ReactionOutcome::RoleGranted { .. })));
    assert!(ctx.platform.holds_role(user(), yellow_role()));
    assert!(ctx.audit.lines().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn removing_role_emoji_revokes_role(ctx: &TestHarness) {
    let executor = ctx.deps.reaction_executor();

    executor
        .process(&reaction_added(YELLOW, MEMBERSHIP_MESSAGE))
        .await;
    let outcome = executor
        .process(&reaction_removed(YELLOW, MEMBERSHIP_MESSAGE))
        .await;

    assert!(matches!(outcome, Some(ReactionOutcome::RoleRevoked { .. })));
    assert!(!ctx.platform.holds_role(user(), yellow_role()));
    assert!(ctx
        .platform
        .calls()
        .contains(&PlatformCall::ResolveMember(ctx.deps.guild_id, user())));
}

#[tokio::test]
async fn missing_role_attempts_no_membership_call() {
    let platform = MockPlatform::new()
        .with_guild(ctx_guild())
        .with_member(user(), USER_NAME);
    let ctx = TestHarness::with_platform(platform).await.unwrap();

    let outcome = ctx
        .deps
        .reaction_executor()
        .process(&reaction_added(YELLOW, MEMBERSHIP_MESSAGE))
        .await;

    assert_eq!(outcome, None);
    assert!(ctx.platform.mutation_calls().is_empty());
    assert_eq!(
        ctx.audit.lines(),
        vec![format!("User {} added emoji {}: Role not found.", USER_NAME, YELLOW)]
    );
}

#[tokio::test]
async fn missing_guild_is_reported_once() {
    let ctx = TestHarness::with_platform(MockPlatform::new()).await.unwrap();

    ctx.deps
        .reaction_executor()
        .process(&reaction_removed(BLUE, MEMBERSHIP_MESSAGE))
        .await;

    let lines = ctx.audit.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("Guild not found."));
    assert!(ctx.platform.mutation_calls().is_empty());
}

// =============================================================================
// Pin / unpin
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn role_emoji_on_other_message_pins(ctx: &TestHarness) {
    let executor = ctx.deps.reaction_executor();

    let outcome = executor
        .process(&reaction_added(BLUE, OTHER_MESSAGE))
        .await;

    assert_eq!(
        outcome,
        Some(ReactionOutcome::Pinned {
            message_id: MessageId::new(OTHER_MESSAGE).unwrap()
        })
    );
    assert!(ctx.platform.is_pinned(MessageId::new(OTHER_MESSAGE).unwrap()));
    assert!(!ctx.platform.holds_role(user(), RoleId::new(BLUE_ROLE).unwrap()));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn pin_emoji_toggles_pin(ctx: &TestHarness) {
    let executor = ctx.deps.reaction_executor();
    let message = MessageId::new(OTHER_MESSAGE).unwrap();

    executor.process(&reaction_added(PIN, OTHER_MESSAGE)).await;
    executor.process(&reaction_added(PIN, OTHER_MESSAGE)).await;
    assert!(ctx.platform.is_pinned(message));

    executor.process(&reaction_removed(PIN, OTHER_MESSAGE)).await;
    assert!(!ctx.platform.is_pinned(message));
    assert!(ctx.audit.lines().is_empty());
}

#[tokio::test]
async fn pin_permission_failure_is_audited_with_channel() {
    let platform = default_platform().with_failure(MockOperation::Pin, PlatformErrorKind::PermissionDenied);
    let ctx = TestHarness::with_platform(platform).await.unwrap();

    let outcome = ctx
        .deps
        .reaction_executor()
        .process(&reaction_added(PIN, OTHER_MESSAGE))
        .await;

    assert_eq!(outcome, None);
    let lines = ctx.audit.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(&format!("channel {}", CHANNEL)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unrecognized_emoji_does_nothing(ctx: &TestHarness) {
    let executor = ctx.deps.reaction_executor();

    let outcome = executor
        .process(&reaction_added("🎉", MEMBERSHIP_MESSAGE))
        .await;

    assert_eq!(outcome, Some(ReactionOutcome::Ignored));
    assert!(ctx.platform.calls().is_empty());
}

// =============================================================================
// Failure isolation
// =============================================================================

#[tokio::test]
async fn failures_do_not_stop_later_events() {
    let platform = default_platform().with_failure(MockOperation::AddMembership, PlatformErrorKind::Transport);
    let ctx = TestHarness::with_platform(platform).await.unwrap();
    let executor = ctx.deps.reaction_executor();

    let failed = executor
        .process(&reaction_added(YELLOW, MEMBERSHIP_MESSAGE))
        .await;
    let pinned = executor.process(&reaction_added(PIN, OTHER_MESSAGE)).await;

    assert_eq!(failed, None);
    assert!(matches!(pinned, Some(ReactionOutcome::Pinned { .. })));
    assert_eq!(ctx.audit.lines().len(), 1);
}

#[tokio::test]
async fn concurrent_events_are_independent() {
    let ctx = TestHarness::new().await.unwrap();
    let executor = ctx.deps.reaction_executor();

    let handles: Vec<_> = [YELLOW, BLUE]
        .into_iter()
        .map(|emoji| {
            let executor = executor.clone();
            let event = reaction_added(emoji, MEMBERSHIP_MESSAGE);
            tokio::spawn(async move { executor.process(&event).await })
        })
        .collect();

    for handle in handles {
        assert!(matches!(
            handle.await.unwrap(),
            Some(ReactionOutcome::RoleGranted { .. })
        ));
    }
    assert!(ctx.platform.holds_role(user(), yellow_role()));
    assert!(ctx.platform.holds_role(user(), RoleId::new(BLUE_ROLE).unwrap()));
}

fn ctx_guild() -> chatbot_core::common::GuildId {
    chatbot_core::common::GuildId::new(GUILD).unwrap()
}
