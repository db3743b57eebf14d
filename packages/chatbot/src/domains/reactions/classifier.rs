//! Reaction classification
//!
//! Pure decision: no IO, no async. Given an emoji, the message it targets and
//! whether it was added, pick the single action the bot should take.

use std::collections::{HashMap, HashSet};

use crate::common::{MessageId, RoleId};

/// The classified consequence of a reaction event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Role emoji added on the membership message
    GrantRole { role_id: RoleId },
    /// Role emoji removed from the membership message
    RevokeRole { role_id: RoleId },
    /// Recognized emoji added anywhere else
    Pin,
    /// Recognized emoji removed anywhere else
    Unpin,
    /// Emoji the bot does not react to
    Ignore,
}

/// Read-only reaction configuration, fixed at startup
#[derive(Debug, Clone)]
pub struct ReactionRules {
    membership_message_id: MessageId,
    role_emojis: HashMap<String, RoleId>,
    recognized: HashSet<String>,
}

impl ReactionRules {
    pub fn new(
        membership_message_id: MessageId,
        role_emojis: HashMap<String, RoleId>,
        recognized: HashSet<String>,
    ) -> Self {
        Self {
            membership_message_id,
            role_emojis,
            recognized,
        }
    }

    pub fn membership_message_id(&self) -> MessageId {
        self.membership_message_id
    }

    pub fn role_for(&self, emoji: &str) -> Option<RoleId> {
        self.role_emojis.get(emoji).copied()
    }

    pub fn is_recognized(&self, emoji: &str) -> bool {
        self.recognized.contains(emoji)
    }

    /// Shorthand for [`classify`] with these rules.
    pub fn classify(&self, emoji: &str, target_message_id: MessageId, added: bool) -> Action {
        classify(self, emoji, target_message_id, added)
    }
}

/// Classify a reaction.
///
/// Rules, in order:
/// 1. unrecognized emoji → [`Action::Ignore`]
/// 2. role emoji on the membership message → grant (added) / revoke (removed)
/// 3. any other recognized emoji, or a role emoji on another message → pin / unpin
pub fn classify(
    rules: &ReactionRules,
    emoji: &str,
    target_message_id: MessageId,
    added: bool,
) -> Action {
    if !rules.is_recognized(emoji) {
        return Action::Ignore;
    }

    if target_message_id == rules.membership_message_id {
        if let Some(role_id) = rules.role_for(emoji) {
            return if added {
                Action::GrantRole { role_id }
            } else {
                Action::RevokeRole { role_id }
            };
        }
    }

    if added {
        Action::Pin
    } else {
        Action::Unpin
    }
}
