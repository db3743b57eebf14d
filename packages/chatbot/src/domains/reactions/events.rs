//! Normalized reaction events.
//!
//! The platform delivers reaction-add and reaction-remove payloads with
//! different shapes (the acting member snapshot is only present on add). The
//! platform adapter folds both into [`ReactionEvent`] so nothing downstream
//! has to care which one it was.

use crate::common::{ChannelId, GuildId, MessageId, UserId};

/// Whether the emoji was added to or removed from the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionChange {
    Added,
    Removed,
}

impl ReactionChange {
    pub fn is_added(self) -> bool {
        matches!(self, ReactionChange::Added)
    }
}

/// Snapshot of the member who reacted, when the platform included one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub user_id: UserId,
    pub name: String,
}

/// A reaction on a guild message. Transient: classified, acted upon, dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub emoji: String,
    pub message_id: MessageId,
    pub channel_id: ChannelId,
    pub guild_id: GuildId,
    pub user_id: UserId,
    pub member: Option<MemberSnapshot>,
    pub change: ReactionChange,
}

impl ReactionEvent {
    /// Name used in audit lines: the member's name when known, else the user ID.
    pub fn actor_label(&self) -> String {
        match &self.member {
            Some(member) => member.name.clone(),
            None => self.user_id.to_string(),
        }
    }
}
