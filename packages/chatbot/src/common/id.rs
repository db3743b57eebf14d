//! Typed integer identifiers for compile-time type safety.
//!
//! Two families of identifiers flow through the bot:
//!
//! - [`Id<T>`]: row identifiers assigned by the catalog database (`INTEGER PRIMARY KEY`).
//! - [`Snowflake<T>`]: non-zero 64-bit identifiers assigned by the chat platform
//!   (guilds, channels, messages, users, roles).
//!
//! The type parameter `T` is a marker for the entity the identifier belongs to,
//! so a `CategoryId` cannot be passed where a `ResourceId` was expected, and a
//! `RoleId` cannot be passed where a `UserId` was expected.
//!
//! # Example
//!
//! ```rust
//! use chatbot_core::common::{CategoryId, ResourceId};
//!
//! let category = CategoryId::from_raw(1);
//! let resource = ResourceId::from_raw(1);
//! assert_eq!(category.get(), resource.get());
//! // let wrong: CategoryId = resource; // compile error
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::NonZeroU64;
use std::str::FromStr;

/// A typed database row identifier.
#[repr(transparent)]
pub struct Id<T>(i64, PhantomData<fn() -> T>);

impl<T> Id<T> {
    /// Wraps a raw row identifier (as returned by `last_insert_rowid`).
    #[inline]
    pub fn from_raw(raw: i64) -> Self {
        Self(raw, PhantomData)
    }

    /// Returns the raw row identifier.
    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl<T> Clone for Id<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(&format!("Id<{}>", short_type_name::<T>()))
            .field(&self.0)
            .finish()
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for Id<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Id<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_raw)
    }
}

// ============================================================================
// sqlx support
// ============================================================================

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteTypeInfo};
use sqlx::{Database, Decode, Encode, Type};

impl<T> Type<Sqlite> for Id<T> {
    fn type_info() -> SqliteTypeInfo {
        <i64 as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <i64 as Type<Sqlite>>::compatible(ty)
    }
}

impl<'q, T> Encode<'q, Sqlite> for Id<T> {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        <i64 as Encode<Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

impl<'r, T> Decode<'r, Sqlite> for Id<T> {
    fn decode(value: <Sqlite as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        <i64 as Decode<Sqlite>>::decode(value).map(Self::from_raw)
    }
}

// ============================================================================
// Platform snowflakes
// ============================================================================

/// A typed, non-zero chat platform identifier.
#[repr(transparent)]
pub struct Snowflake<T>(NonZeroU64, PhantomData<fn() -> T>);

/// Error returned when parsing a [`Snowflake`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("identifier is not an unsigned integer: '{0}'")]
    NotANumber(String),

    #[error("identifier must not be zero")]
    Zero,
}

impl<T> Snowflake<T> {
    /// Wraps a raw platform identifier, returning `None` for zero.
    #[inline]
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(|value| Self(value, PhantomData))
    }

    /// Wraps an identifier the platform already guarantees to be non-zero.
    #[inline]
    pub fn from_non_zero(raw: NonZeroU64) -> Self {
        Self(raw, PhantomData)
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// Parses a decimal identifier (environment variables, command arguments).
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        let raw: u64 = s
            .trim()
            .parse()
            .map_err(|_| SnowflakeParseError::NotANumber(s.to_string()))?;
        Self::new(raw).ok_or(SnowflakeParseError::Zero)
    }
}

impl<T> Clone for Snowflake<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Snowflake<T> {}

impl<T> Debug for Snowflake<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(short_type_name::<T>()).field(&self.0).finish()
    }
}

impl<T> Display for Snowflake<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for Snowflake<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Snowflake<T> {}

impl<T> Hash for Snowflake<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> FromStr for Snowflake<T> {
    type Err = SnowflakeParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T> Serialize for Snowflake<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Snowflake<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NonZeroU64::deserialize(deserializer).map(Self::from_non_zero)
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row;
    struct Guild;

    type RowId = Id<Row>;
    type GuildId = Snowflake<Guild>;

    #[test]
    fn test_row_id_display_and_ordering() {
        let a = RowId::from_raw(1);
        let b = RowId::from_raw(2);
        assert!(a < b);
        assert_eq!(a.to_string(), "1");
    }

    #[test]
    fn test_snowflake_parse() {
        let id: GuildId = "1294578631879692350".parse().unwrap();
        assert_eq!(id.get(), 1294578631879692350);
        assert_eq!(GuildId::parse(" 42 ").unwrap().get(), 42);
    }

    #[test]
    fn test_snowflake_rejects_zero_and_garbage() {
        assert_eq!(GuildId::parse("0"), Err(SnowflakeParseError::Zero));
        assert!(matches!(
            GuildId::parse("abc"),
            Err(SnowflakeParseError::NotANumber(_))
        ));
        assert!(GuildId::new(0).is_none());
    }

    #[test]
    fn test_debug_includes_type_name() {
        let id = GuildId::new(7).unwrap();
        assert!(format!("{:?}", id).contains("Guild"));
        assert!(format!("{:?}", RowId::from_raw(3)).contains("Row"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = GuildId::new(99).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "99");
        let parsed: GuildId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
