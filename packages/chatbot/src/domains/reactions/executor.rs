//! Reaction executor - carries out a classified action on the chat platform
//!
//! Role grant/revoke and pin/unpin are best effort and idempotent: the platform
//! is the source of truth, so granting a held role or pinning a pinned message
//! is simply forwarded. Every failure is turned into a [`ReactionError`] and,
//! at the [`ReactionExecutor::process`] boundary, written to the audit sink.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::classifier::{Action, ReactionRules};
use super::events::ReactionEvent;
use crate::common::{MessageId, RoleId, UserId};
use crate::kernel::{audit_log, BaseAuditSink, BasePlatform, PlatformError};

/// The side-effecting action kinds (everything but `Ignore`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    GrantRole,
    RevokeRole,
    Pin,
    Unpin,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::GrantRole => write!(f, "grant role"),
            ActionKind::RevokeRole => write!(f, "revoke role"),
            ActionKind::Pin => write!(f, "pin message"),
            ActionKind::Unpin => write!(f, "unpin message"),
        }
    }
}

/// What the executor did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionOutcome {
    Ignored,
    RoleGranted { user_id: UserId, role_id: RoleId },
    RoleRevoked { user_id: UserId, role_id: RoleId },
    Pinned { message_id: MessageId },
    Unpinned { message_id: MessageId },
}

/// Reaction failures. The `Display` text is the audit line.
#[derive(Debug, Error)]
pub enum ReactionError {
    /// Guild, role, member, channel or message missing on the platform side
    #[error("{context}: {target} not found.")]
    NotFound { context: String, target: String },

    /// The platform refused the request or could not be reached
    #[error("{context}: failed to {kind} for {target}: {source}")]
    ActionFailed {
        context: String,
        kind: ActionKind,
        target: String,
        #[source]
        source: PlatformError,
    },
}

impl ReactionError {
    fn from_platform(
        error: PlatformError,
        context: &str,
        kind: ActionKind,
        target: String,
    ) -> Self {
        if error.is_not_found() {
            ReactionError::NotFound {
                context: context.to_string(),
                target,
            }
        } else {
            ReactionError::ActionFailed {
                context: context.to_string(),
                kind,
                target,
                source: error,
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ReactionError::NotFound { .. })
    }
}

/// Executes classified reactions against the platform
#[derive(Clone)]
pub struct ReactionExecutor {
    platform: Arc<dyn BasePlatform>,
    audit: Arc<dyn BaseAuditSink>,
    rules: Arc<ReactionRules>,
}

impl ReactionExecutor {
    pub fn new(
        platform: Arc<dyn BasePlatform>,
        audit: Arc<dyn BaseAuditSink>,
        rules: Arc<ReactionRules>,
    ) -> Self {
        Self {
            platform,
            audit,
            rules,
        }
    }

    /// Classify and execute one reaction event.
    ///
    /// Never fails: errors are traced and sent to the audit sink, and `None`
    /// is returned so the caller can move on to the next event.
    pub async fn process(&self, event: &ReactionEvent) -> Option<ReactionOutcome> {
        let action = self
            .rules
            .classify(&event.emoji, event.message_id, event.change.is_added());

        debug!(
            emoji = %event.emoji,
            message_id = %event.message_id,
            user_id = %event.user_id,
            action = ?action,
            "Classified reaction"
        );

        match self.execute(action, event).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(error = %e, message_id = %event.message_id, "Reaction action failed");
                audit_log(self.audit.as_ref(), &e.to_string()).await;
                None
            }
        }
    }

    /// Execute an already classified action
    pub async fn execute(
        &self,
        action: Action,
        event: &ReactionEvent,
    ) -> Result<ReactionOutcome, ReactionError> {
        match action {
            Action::Ignore => Ok(ReactionOutcome::Ignored),
            Action::GrantRole { role_id } => {
                self.change_role(event, role_id, ActionKind::GrantRole).await
            }
            Action::RevokeRole { role_id } => {
                self.change_role(event, role_id, ActionKind::RevokeRole).await
            }
            Action::Pin => self.change_pin(event, ActionKind::Pin).await,
            Action::Unpin => self.change_pin(event, ActionKind::Unpin).await,
        }
    }

    async fn change_role(
        &self,
        event: &ReactionEvent,
        role_id: RoleId,
        kind: ActionKind,
    ) -> Result<ReactionOutcome, ReactionError> {
        let mut context = describe(&event.actor_label(), event, kind);
        let guild_id = event.guild_id;

        self.platform
            .resolve_guild(guild_id)
            .await
            .map_err(|e| ReactionError::from_platform(e, &context, kind, "Guild".into()))?;

        let role = self
            .platform
            .resolve_role(guild_id, role_id)
            .await
            .map_err(|e| ReactionError::from_platform(e, &context, kind, "Role".into()))?;

        let user_id = match &event.member {
            Some(snapshot) => snapshot.user_id,
            None => {
                let member = self
                    .platform
                    .resolve_member(guild_id, event.user_id)
                    .await
                    .map_err(|e| {
                        ReactionError::from_platform(
                            e,
                            &context,
                            kind,
                            format!("Member '{}'", event.user_id),
                        )
                    })?;
                context = describe(&member.name, event, kind);
                member.user_id
            }
        };

        let target = format!("role '{}' of user {}", role.name, user_id);
        let result = match kind {
            ActionKind::GrantRole => {
                self.platform
                    .add_membership(guild_id, user_id, role.id)
                    .await
            }
            _ => {
                self.platform
                    .remove_membership(guild_id, user_id, role.id)
                    .await
            }
        };
        result.map_err(|e| ReactionError::from_platform(e, &context, kind, target))?;

        match kind {
            ActionKind::GrantRole => {
                info!(user_id = %user_id, role_id = %role.id, "{}: Role given.", context);
                Ok(ReactionOutcome::RoleGranted {
                    user_id,
                    role_id: role.id,
                })
            }
            _ => {
                info!(user_id = %user_id, role_id = %role.id, "{}: Role removed.", context);
                Ok(ReactionOutcome::RoleRevoked {
                    user_id,
                    role_id: role.id,
                })
            }
        }
    }

    async fn change_pin(
        &self,
        event: &ReactionEvent,
        kind: ActionKind,
    ) -> Result<ReactionOutcome, ReactionError> {
        let context = describe(&event.actor_label(), event, kind);
        let channel_target = format!("channel {}", event.channel_id);
        let message_target = format!("Message {}", event.message_id);

        let channel = self
            .platform
            .resolve_channel(event.channel_id)
            .await
            .map_err(|e| ReactionError::from_platform(e, &context, kind, channel_target.clone()))?;

        let message = self
            .platform
            .resolve_message(channel.id, event.message_id)
            .await
            .map_err(|e| ReactionError::from_platform(e, &context, kind, message_target.clone()))?;

        let result = match kind {
            ActionKind::Pin => self.platform.pin_message(channel.id, message.id).await,
            _ => self.platform.unpin_message(channel.id, message.id).await,
        };

        result.map_err(|e| {
            let target = if e.is_not_found() {
                message_target
            } else {
                channel_target
            };
            ReactionError::from_platform(e, &context, kind, target)
        })?;

        info!(channel_id = %channel.id, message_id = %message.id, "{}: done.", context);

        Ok(match kind {
            ActionKind::Pin => ReactionOutcome::Pinned {
                message_id: message.id,
            },
            _ => ReactionOutcome::Unpinned {
                message_id: message.id,
            },
        })
    }
}

/// Human readable prefix for log and audit lines
fn describe(actor: &str, event: &ReactionEvent, kind: ActionKind) -> String {
    match kind {
        ActionKind::GrantRole => format!("User {} added emoji {}", actor, event.emoji),
        ActionKind::RevokeRole => format!("User {} removed emoji {}", actor, event.emoji),
        ActionKind::Pin => format!("User {} wants to pin message", actor),
        ActionKind::Unpin => format!("User {} wants to unpin message", actor),
    }
}
