// Common types shared across the bot

pub mod command;
pub mod entity_ids;
pub mod id;

pub use command::{
    CommandReply, Invocation, ReplyField, ReplyKind, EMBED_FIELD_LIMIT, EMBED_TEXT_LIMIT,
    FIELD_VALUE_LIMIT, LONG_EXPIRY, SHORT_EXPIRY,
};
pub use entity_ids::*;
pub use id::{Id, Snowflake, SnowflakeParseError};
