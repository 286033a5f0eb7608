//! Event payload definitions
//!
//! Only the fields the role engine reads are modelled; unknown fields are
//! ignored. Snowflakes are accepted as strings or numbers.

use rolekeeper_core::Snowflake;
use serde::{Deserialize, Serialize};

/// A gateway frame; dispatch frames carry the event name in `t`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchFrame {
    pub op: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,
    #[serde(default)]
    pub d: serde_json::Value,
}

impl DispatchFrame {
    /// Opcode of event dispatches
    pub const DISPATCH: u8 = 0;
}

/// Partial user with just ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdPayload {
    pub id: Snowflake,
}

/// GUILD_MEMBER_ADD event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildMemberAddPayload {
    pub guild_id: Snowflake,
    pub user: UserIdPayload,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
}

/// GUILD_MEMBER_UPDATE event payload; `roles` is the complete new set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildMemberUpdatePayload {
    pub guild_id: Snowflake,
    pub user: UserIdPayload,
    pub roles: Vec<Snowflake>,
}

/// GUILD_ROLE_DELETE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildRoleDeletePayload {
    pub guild_id: Snowflake,
    pub role_id: Snowflake,
}

/// Emoji of a reaction; custom emojis carry an ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmojiPayload {
    #[serde(default)]
    pub id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
}

impl EmojiPayload {
    /// Key used to match configured reaction roles: the unicode emoji itself,
    /// or `name:id` for a custom emoji
    pub fn key(&self) -> Option<String> {
        match (&self.name, self.id) {
            (Some(name), Some(id)) => Some(format!("{name}:{id}")),
            (Some(name), None) => Some(name.clone()),
            (None, _) => None,
        }
    }
}

/// MESSAGE_REACTION_ADD event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReactionAddPayload {
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    /// Absent for reactions in direct messages
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    pub emoji: EmojiPayload,
}
