use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::env;

use crate::common::{ChannelId, GuildId, MessageId, RoleId};
use crate::domains::reactions::ReactionRules;

/// Pin emoji used when `PIN_EMOJIS` is not set
pub const DEFAULT_PIN_EMOJI: &str = "📌";

/// Role emojis used when `ROLE_EMOJIS` is not set
pub const DEFAULT_ROLE_EMOJIS: [(&str, u64); 2] = [
    ("🟨", 1294578631879692350),
    ("🟦", 1294579583873449994),
];

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub guild_id: GuildId,
    pub roles_message_id: MessageId,
    pub logs_channel_id: ChannelId,
    pub role_emojis: HashMap<String, RoleId>,
    pub pin_emojis: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let role_emojis = match env::var("ROLE_EMOJIS") {
            Ok(raw) => parse_role_emojis(&raw).context("ROLE_EMOJIS must be a JSON object")?,
            Err(_) => default_role_emojis(),
        };

        let pin_emojis = match env::var("PIN_EMOJIS") {
            Ok(raw) => parse_emoji_list(&raw),
            Err(_) => vec![DEFAULT_PIN_EMOJI.to_string()],
        };

        Ok(Self {
            bot_token: env::var("BOT_TOKEN").context("BOT_TOKEN must be set")?,
            guild_id: required_id("SERVER_ID")?,
            roles_message_id: required_id("ROLES_MESSAGE_ID")?,
            logs_channel_id: required_id("BOT_LOGS_CHANNEL_ID")?,
            role_emojis,
            pin_emojis,
        })
    }

    /// Build the reaction rules shared by the reaction pipeline.
    ///
    /// The recognized set is the pin emojis plus every role emoji.
    pub fn reaction_rules(&self) -> ReactionRules {
        let mut recognized: HashSet<String> = self.pin_emojis.iter().cloned().collect();
        recognized.extend(self.role_emojis.keys().cloned());

        ReactionRules::new(self.roles_message_id, self.role_emojis.clone(), recognized)
    }
}

fn required_id<T>(name: &str) -> Result<crate::common::Snowflake<T>> {
    let raw = env::var(name).with_context(|| format!("{} must be set", name))?;
    raw.parse()
        .with_context(|| format!("{} must be a non-zero numeric ID", name))
}

fn default_role_emojis() -> HashMap<String, RoleId> {
    DEFAULT_ROLE_EMOJIS
        .iter()
        .filter_map(|(emoji, role)| RoleId::new(*role).map(|id| (emoji.to_string(), id)))
        .collect()
}

/// A role ID as written in `ROLE_EMOJIS`: JSON string or number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRoleId {
    Text(String),
    Number(u64),
}

/// Parse `{"🟨": "1294578631879692350", "🟦": 1294579583873449994}`.
pub fn parse_role_emojis(raw: &str) -> Result<HashMap<String, RoleId>> {
    let parsed: BTreeMap<String, RawRoleId> = serde_json::from_str(raw)?;
    let mut mapping = HashMap::with_capacity(parsed.len());

    for (emoji, value) in parsed {
        let role = match value {
            RawRoleId::Text(s) => RoleId::parse(&s)
                .with_context(|| format!("invalid role ID for emoji {}", emoji))?,
            RawRoleId::Number(n) => RoleId::new(n)
                .with_context(|| format!("role ID for emoji {} must be non-zero", emoji))?,
        };
        mapping.insert(emoji, role);
    }

    Ok(mapping)
}

/// Parse a comma separated emoji list, dropping blanks.
pub fn parse_emoji_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
