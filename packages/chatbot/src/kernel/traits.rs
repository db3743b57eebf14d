// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The reaction executor and command handlers only ever see these traits, never
// the concrete chat client, so tests can swap in recording mocks.
//
// Naming convention: Base* for trait names (e.g., BasePlatform, BaseAuditSink)

use async_trait::async_trait;
use thiserror::Error;

use crate::common::{ChannelId, GuildId, MessageId, RoleId, UserId};

// =============================================================================
// Platform errors
// =============================================================================

/// Broad category of a platform failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformErrorKind {
    /// Guild, role, member, channel or message does not exist
    NotFound,
    /// The bot lacks the permission for the request
    PermissionDenied,
    /// Anything else: network, rate limit, malformed response
    Transport,
}

/// Failure reported by the chat platform, independent of the client library
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PlatformError {
    kind: PlatformErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PlatformError {
    pub fn new(kind: PlatformErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorKind::NotFound, message)
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorKind::PermissionDenied, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorKind::Transport, message)
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> PlatformErrorKind {
        self.kind
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == PlatformErrorKind::NotFound
    }

    pub fn is_permission_denied(&self) -> bool {
        self.kind == PlatformErrorKind::PermissionDenied
    }
}

pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

// =============================================================================
// Resolved platform entities
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildInfo {
    pub id: GuildId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
    pub id: RoleId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub user_id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: ChannelId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageInfo {
    pub id: MessageId,
    pub channel_id: ChannelId,
}

// =============================================================================
// Platform Trait (Infrastructure - guild, role and message requests)
// =============================================================================

#[async_trait]
pub trait BasePlatform: Send + Sync {
    async fn resolve_guild(&self, guild_id: GuildId) -> PlatformResult<GuildInfo>;

    async fn resolve_role(&self, guild_id: GuildId, role_id: RoleId) -> PlatformResult<RoleInfo>;

    async fn resolve_member(&self, guild_id: GuildId, user_id: UserId)
        -> PlatformResult<MemberInfo>;

    async fn resolve_channel(&self, channel_id: ChannelId) -> PlatformResult<ChannelInfo>;

    async fn resolve_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> PlatformResult<MessageInfo>;

    /// Give a role to a member. Granting a role the member already holds is not an error.
    async fn add_membership(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> PlatformResult<()>;

    /// Take a role from a member. Removing a role the member lacks is not an error.
    async fn remove_membership(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> PlatformResult<()>;

    async fn pin_message(&self, channel_id: ChannelId, message_id: MessageId)
        -> PlatformResult<()>;

    async fn unpin_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> PlatformResult<()>;
}

// =============================================================================
// Audit Sink Trait (Infrastructure - human readable bot log)
// =============================================================================

#[async_trait]
pub trait BaseAuditSink: Send + Sync {
    /// Deliver one plain text line
    async fn send(&self, message: &str) -> PlatformResult<()>;
}
