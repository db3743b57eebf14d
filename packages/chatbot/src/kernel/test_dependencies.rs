// TestDependencies - mock implementations for testing
//
// Recording mocks for the platform and audit sink traits. Both keep their state
// behind Arc<Mutex<..>> so a clone handed to the code under test and the clone
// kept by the test observe the same calls.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::{
    BaseAuditSink, BasePlatform, ChannelInfo, GuildInfo, MemberInfo, MessageInfo, PlatformError,
    PlatformErrorKind, PlatformResult, RoleInfo,
};
use crate::common::{ChannelId, GuildId, MessageId, RoleId, UserId};

// =============================================================================
// Mock Platform
// =============================================================================

/// One recorded request against the mock platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    ResolveGuild(GuildId),
    ResolveRole(GuildId, RoleId),
    ResolveMember(GuildId, UserId),
    ResolveChannel(ChannelId),
    ResolveMessage(ChannelId, MessageId),
    AddMembership {
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    },
    RemoveMembership {
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    },
    Pin {
        channel_id: ChannelId,
        message_id: MessageId,
    },
    Unpin {
        channel_id: ChannelId,
        message_id: MessageId,
    },
}

impl PlatformCall {
    /// True for the calls that change platform state
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            PlatformCall::AddMembership { .. }
                | PlatformCall::RemoveMembership { .. }
                | PlatformCall::Pin { .. }
                | PlatformCall::Unpin { .. }
        )
    }
}

/// Operations that can be forced to fail with [`MockPlatform::with_failure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    ResolveGuild,
    ResolveRole,
    ResolveMember,
    ResolveChannel,
    ResolveMessage,
    AddMembership,
    RemoveMembership,
    Pin,
    Unpin,
}

#[derive(Default)]
struct MockPlatformState {
    guilds: HashSet<GuildId>,
    roles: HashSet<RoleId>,
    members: HashMap<UserId, String>,
    channels: HashSet<ChannelId>,
    messages: HashSet<(ChannelId, MessageId)>,
    memberships: HashSet<(UserId, RoleId)>,
    pinned: HashSet<MessageId>,
    failures: HashMap<MockOperation, PlatformErrorKind>,
    calls: Vec<PlatformCall>,
}

/// In-memory platform that behaves idempotently like the real one:
/// granting a held role or pinning a pinned message succeeds.
#[derive(Clone, Default)]
pub struct MockPlatform {
    state: Arc<Mutex<MockPlatformState>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guild(self, guild_id: GuildId) -> Self {
        self.state.lock().unwrap().guilds.insert(guild_id);
        self
    }

    pub fn with_role(self, role_id: RoleId) -> Self {
        self.state.lock().unwrap().roles.insert(role_id);
        self
    }

    pub fn with_member(self, user_id: UserId, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .members
            .insert(user_id, name.to_string());
        self
    }

    pub fn with_channel(self, channel_id: ChannelId) -> Self {
        self.state.lock().unwrap().channels.insert(channel_id);
        self
    }

    /// Register a message in a channel; messages not registered are not found
    pub fn with_message(self, channel_id: ChannelId, message_id: MessageId) -> Self {
        self.state
            .lock()
            .unwrap()
            .messages
            .insert((channel_id, message_id));
        self
    }

    /// Make every call of `operation` fail with `kind`
    pub fn with_failure(self, operation: MockOperation, kind: PlatformErrorKind) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(operation, kind);
        self
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Only the state-changing calls
    pub fn mutation_calls(&self) -> Vec<PlatformCall> {
        self.calls().into_iter().filter(|c| c.is_mutation()).collect()
    }

    pub fn holds_role(&self, user_id: UserId, role_id: RoleId) -> bool {
        self.state
            .lock()
            .unwrap()
            .memberships
            .contains(&(user_id, role_id))
    }

    pub fn is_pinned(&self, message_id: MessageId) -> bool {
        self.state.lock().unwrap().pinned.contains(&message_id)
    }

    fn record(&self, call: PlatformCall, operation: MockOperation) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.failures.get(&operation) {
            Some(kind) => Err(PlatformError::new(
                *kind,
                format!("mock failure for {:?}", operation),
            )),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BasePlatform for MockPlatform {
    async fn resolve_guild(&self, guild_id: GuildId) -> PlatformResult<GuildInfo> {
        self.record(PlatformCall::ResolveGuild(guild_id), MockOperation::ResolveGuild)?;
        if self.state.lock().unwrap().guilds.contains(&guild_id) {
            Ok(GuildInfo {
                id: guild_id,
                name: "Test Guild".to_string(),
            })
        } else {
            Err(PlatformError::not_found(format!("Unknown guild {}", guild_id)))
        }
    }

    async fn resolve_role(&self, guild_id: GuildId, role_id: RoleId) -> PlatformResult<RoleInfo> {
        self.record(
            PlatformCall::ResolveRole(guild_id, role_id),
            MockOperation::ResolveRole,
        )?;
        if self.state.lock().unwrap().roles.contains(&role_id) {
            Ok(RoleInfo {
                id: role_id,
                name: format!("role-{}", role_id),
            })
        } else {
            Err(PlatformError::not_found(format!("Unknown role {}", role_id)))
        }
    }

    async fn resolve_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> PlatformResult<MemberInfo> {
        self.record(
            PlatformCall::ResolveMember(guild_id, user_id),
            MockOperation::ResolveMember,
        )?;
        match self.state.lock().unwrap().members.get(&user_id) {
            Some(name) => Ok(MemberInfo {
                user_id,
                name: name.clone(),
            }),
            None => Err(PlatformError::not_found(format!("Unknown member {}", user_id))),
        }
    }

    async fn resolve_channel(&self, channel_id: ChannelId) -> PlatformResult<ChannelInfo> {
        self.record(
            PlatformCall::ResolveChannel(channel_id),
            MockOperation::ResolveChannel,
        )?;
        if self.state.lock().unwrap().channels.contains(&channel_id) {
            Ok(ChannelInfo { id: channel_id })
        } else {
            Err(PlatformError::not_found(format!("Unknown channel {}", channel_id)))
        }
    }

    async fn resolve_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> PlatformResult<MessageInfo> {
        self.record(
            PlatformCall::ResolveMessage(channel_id, message_id),
            MockOperation::ResolveMessage,
        )?;
        if self
            .state
            .lock()
            .unwrap()
            .messages
            .contains(&(channel_id, message_id))
        {
            Ok(MessageInfo {
                id: message_id,
                channel_id,
            })
        } else {
            Err(PlatformError::not_found(format!("Unknown message {}", message_id)))
        }
    }

    async fn add_membership(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> PlatformResult<()> {
        self.record(
            PlatformCall::AddMembership {
                guild_id,
                user_id,
                role_id,
            },
            MockOperation::AddMembership,
        )?;
        self.state
            .lock()
            .unwrap()
            .memberships
            .insert((user_id, role_id));
        Ok(())
    }

    async fn remove_membership(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> PlatformResult<()> {
        self.record(
            PlatformCall::RemoveMembership {
                guild_id,
                user_id,
                role_id,
            },
            MockOperation::RemoveMembership,
        )?;
        self.state
            .lock()
            .unwrap()
            .memberships
            .remove(&(user_id, role_id));
        Ok(())
    }

    async fn pin_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> PlatformResult<()> {
        self.record(
            PlatformCall::Pin {
                channel_id,
                message_id,
            },
            MockOperation::Pin,
        )?;
        self.state.lock().unwrap().pinned.insert(message_id);
        Ok(())
    }

    async fn unpin_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> PlatformResult<()> {
        self.record(
            PlatformCall::Unpin {
                channel_id,
                message_id,
            },
            MockOperation::Unpin,
        )?;
        self.state.lock().unwrap().pinned.remove(&message_id);
        Ok(())
    }
}

// =============================================================================
// Mock Audit Sink
// =============================================================================

#[derive(Clone, Default)]
pub struct MockAuditSink {
    lines: Arc<Mutex<Vec<String>>>,
    attempts: Arc<Mutex<usize>>,
    fail: bool,
}

impl MockAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every delivery fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Lines delivered so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl BaseAuditSink for MockAuditSink {
    async fn send(&self, message: &str) -> PlatformResult<()> {
        *self.attempts.lock().unwrap() += 1;
        if self.fail {
            return Err(PlatformError::transport("mock audit sink is down"));
        }
        self.lines.lock().unwrap().push(message.to_string());
        Ok(())
    }
}
