//! Ids, emojis and event builders shared by the integration tests.

use chatbot_core::common::{ChannelId, GuildId, MessageId, UserId};
use chatbot_core::domains::reactions::{MemberSnapshot, ReactionChange, ReactionEvent};

pub const GUILD: u64 = 1_100;
pub const CHANNEL: u64 = 2_200;
pub const LOGS_CHANNEL: u64 = 2_300;
pub const MEMBERSHIP_MESSAGE: u64 = 3_300;
pub const OTHER_MESSAGE: u64 = 3_400;
pub const USER: u64 = 4_400;
pub const USER_NAME: &str = "alice";

pub const YELLOW: &str = "🟨";
pub const BLUE: &str = "🟦";
pub const PIN: &str = "📌";
pub const YELLOW_ROLE: u64 = 1294578631879692350;
pub const BLUE_ROLE: u64 = 1294579583873449994;

/// Reaction added by the test user; carries the member snapshot like the gateway does
pub fn reaction_added(emoji: &str, message_id: u64) -> ReactionEvent {
    ReactionEvent {
        member: Some(MemberSnapshot {
            user_id: UserId::new(USER).unwrap(),
            name: USER_NAME.to_string(),
        }),
        ..reaction(emoji, message_id, ReactionChange::Added)
    }
}

/// Reaction removed by the test user; no member snapshot
pub fn reaction_removed(emoji: &str, message_id: u64) -> ReactionEvent {
    reaction(emoji, message_id, ReactionChange::Removed)
}

fn reaction(emoji: &str, message_id: u64, change: ReactionChange) -> ReactionEvent {
    ReactionEvent {
        emoji: emoji.to_string(),
        message_id: MessageId::new(message_id).unwrap(),
        channel_id: ChannelId::new(CHANNEL).unwrap(),
        guild_id: GuildId::new(GUILD).unwrap(),
        user_id: UserId::new(USER).unwrap(),
        member: None,
        change,
    }
}
