//! Typed ID definitions for catalog rows and platform entities.
//!
//! # Example
//!
//! ```rust
//! use chatbot_core::common::{MessageId, UserId};
//!
//! let message = MessageId::new(42).unwrap();
//! let user = UserId::new(42).unwrap();
//! assert_eq!(message.get(), user.get());
//! // let wrong: MessageId = user; // compile error
//! ```

pub use super::id::{Id, Snowflake, SnowflakeParseError};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for catalog categories.
pub struct Category;

/// Marker type for catalog resources (indexed links).
pub struct Resource;

/// Marker type for the guild (community) the bot serves.
pub struct Guild;

/// Marker type for text channels.
pub struct Channel;

/// Marker type for chat messages.
pub struct Message;

/// Marker type for users / guild members.
pub struct User;

/// Marker type for guild roles.
pub struct Role;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for catalog categories.
pub type CategoryId = Id<Category>;

/// Typed ID for catalog resources.
pub type ResourceId = Id<Resource>;

pub type GuildId = Snowflake<Guild>;
pub type ChannelId = Snowflake<Channel>;
pub type MessageId = Snowflake<Message>;
pub type UserId = Snowflake<User>;
pub type RoleId = Snowflake<Role>;
