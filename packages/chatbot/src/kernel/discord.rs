// Discord implementations of the infrastructure traits
//
// Everything serenity-specific stays in this file: the REST calls behind
// BasePlatform, the audit channel, and the normalization of gateway reaction
// payloads into a ReactionEvent.

use async_trait::async_trait;
use serenity::builder::CreateMessage;
use serenity::http::Http;
use serenity::model::channel::{MessageFlags, Reaction, ReactionType};
use serenity::model::id as discord_id;
use std::sync::Arc;
use tracing::debug;

use super::{
    BaseAuditSink, BasePlatform, ChannelInfo, GuildInfo, MemberInfo, MessageInfo, PlatformError,
    PlatformErrorKind, PlatformResult, RoleInfo,
};
use crate::common::{ChannelId, GuildId, MessageId, RoleId, Snowflake, UserId};
use crate::domains::reactions::{MemberSnapshot, ReactionChange, ReactionEvent};

// =============================================================================
// Error conversion
// =============================================================================

impl From<serenity::Error> for PlatformError {
    fn from(error: serenity::Error) -> Self {
        let status = match &error {
            serenity::Error::Http(http_error) => http_error.status_code().map(|s| s.as_u16()),
            _ => None,
        };

        let kind = match status {
            Some(404) => PlatformErrorKind::NotFound,
            Some(401) | Some(403) => PlatformErrorKind::PermissionDenied,
            _ => PlatformErrorKind::Transport,
        };

        PlatformError::new(kind, error.to_string()).with_source(error)
    }
}

// =============================================================================
// Id conversion
// =============================================================================

fn guild(id: GuildId) -> discord_id::GuildId {
    discord_id::GuildId::new(id.get())
}

fn channel(id: ChannelId) -> discord_id::ChannelId {
    discord_id::ChannelId::new(id.get())
}

fn message(id: MessageId) -> discord_id::MessageId {
    discord_id::MessageId::new(id.get())
}

fn user(id: UserId) -> discord_id::UserId {
    discord_id::UserId::new(id.get())
}

fn role(id: RoleId) -> discord_id::RoleId {
    discord_id::RoleId::new(id.get())
}

// =============================================================================
// Platform
// =============================================================================

/// [`BasePlatform`] over serenity's REST client
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Http>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl BasePlatform for DiscordPlatform {
    async fn resolve_guild(&self, guild_id: GuildId) -> PlatformResult<GuildInfo> {
        let partial = guild(guild_id).to_partial_guild(self.http.as_ref()).await?;
        Ok(GuildInfo {
            id: guild_id,
            name: partial.name,
        })
    }

    async fn resolve_role(&self, guild_id: GuildId, role_id: RoleId) -> PlatformResult<RoleInfo> {
        let roles = guild(guild_id).roles(self.http.as_ref()).await?;
        roles
            .get(&role(role_id))
            .map(|r| RoleInfo {
                id: role_id,
                name: r.name.clone(),
            })
            .ok_or_else(|| PlatformError::not_found(format!("Unknown role {}", role_id)))
    }

    async fn resolve_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> PlatformResult<MemberInfo> {
        let member = guild(guild_id)
            .member(self.http.as_ref(), user(user_id))
            .await?;
        Ok(MemberInfo {
            user_id,
            name: member.user.name,
        })
    }

    async fn resolve_channel(&self, channel_id: ChannelId) -> PlatformResult<ChannelInfo> {
        channel(channel_id).to_channel(self.http.as_ref()).await?;
        Ok(ChannelInfo { id: channel_id })
    }

    async fn resolve_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> PlatformResult<MessageInfo> {
        channel(channel_id)
            .message(self.http.as_ref(), message(message_id))
            .await?;
        Ok(MessageInfo {
            id: message_id,
            channel_id,
        })
    }

    async fn add_membership(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> PlatformResult<()> {
        self.http
            .add_member_role(guild(guild_id), user(user_id), role(role_id), None)
            .await?;
        Ok(())
    }

    async fn remove_membership(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> PlatformResult<()> {
        self.http
            .remove_member_role(guild(guild_id), user(user_id), role(role_id), None)
            .await?;
        Ok(())
    }

    async fn pin_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> PlatformResult<()> {
        channel(channel_id)
            .pin(self.http.as_ref(), message(message_id))
            .await?;
        Ok(())
    }

    async fn unpin_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> PlatformResult<()> {
        channel(channel_id)
            .unpin(self.http.as_ref(), message(message_id))
            .await?;
        Ok(())
    }
}

// =============================================================================
// Audit sink
// =============================================================================

/// Posts audit lines as plain messages in the bot log channel
#[derive(Clone)]
pub struct ChannelAuditSink {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl ChannelAuditSink {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl BaseAuditSink for ChannelAuditSink {
    async fn send(&self, text: &str) -> PlatformResult<()> {
        let builder = CreateMessage::new()
            .content(text)
            .flags(MessageFlags::SUPPRESS_EMBEDS);
        channel(self.channel_id)
            .send_message(self.http.as_ref(), builder)
            .await?;
        Ok(())
    }
}

// =============================================================================
// Reaction normalization
// =============================================================================

/// Text form of a reaction emoji: the unicode symbol, or the name of a custom emoji
pub fn emoji_text(emoji: &ReactionType) -> Option<String> {
    match emoji {
        ReactionType::Unicode(symbol) => Some(symbol.clone()),
        ReactionType::Custom { name, .. } => name.clone(),
        _ => None,
    }
}

/// Turn a gateway reaction payload into a [`ReactionEvent`].
///
/// Returns `None` for reactions outside a guild, without a user, or with an
/// emoji that has no textual form.
pub fn normalize_reaction(reaction: &Reaction, change: ReactionChange) -> Option<ReactionEvent> {
    let Some(emoji) = emoji_text(&reaction.emoji) else {
        debug!(message_id = %reaction.message_id, "Dropping reaction without emoji text");
        return None;
    };
    let guild_id = Snowflake::new(reaction.guild_id?.get())?;
    let user_id: UserId = Snowflake::new(reaction.user_id?.get())?;

    let member = reaction.member.as_ref().map(|member| MemberSnapshot {
        user_id,
        name: member.user.name.clone(),
    });

    Some(ReactionEvent {
        emoji,
        message_id: Snowflake::new(reaction.message_id.get())?,
        channel_id: Snowflake::new(reaction.channel_id.get())?,
        guild_id,
        user_id,
        member,
        change,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::model::id::EmojiId;

    #[test]
    fn test_emoji_text_for_unicode_and_custom() {
        assert_eq!(
            emoji_text(&ReactionType::Unicode("📌".to_string())).as_deref(),
            Some("📌")
        );
        assert_eq!(
            emoji_text(&ReactionType::Custom {
                animated: false,
                id: EmojiId::new(5),
                name: Some("flag".to_string()),
            })
            .as_deref(),
            Some("flag")
        );
        assert_eq!(
            emoji_text(&ReactionType::Custom {
                animated: false,
                id: EmojiId::new(5),
                name: None,
            }),
            None
        );
    }

    #[test]
    fn test_id_conversion_keeps_value() {
        let id = MessageId::new(1294578631879692350).unwrap();
        assert_eq!(message(id).get(), 1294578631879692350);
    }
}
