//! Gateway event types
//!
//! Event names, as sent in the `t` field of dispatch messages, that the role
//! engine subscribes to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gateway event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEventType {
    /// User joined guild
    GuildMemberAdd,
    /// Member updated (roles, nickname)
    GuildMemberUpdate,
    /// Role deleted from the guild
    GuildRoleDelete,
    /// Reaction added to a message
    MessageReactionAdd,
}

impl GatewayEventType {
    /// Get the string representation of the event type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GuildMemberAdd => "GUILD_MEMBER_ADD",
            Self::GuildMemberUpdate => "GUILD_MEMBER_UPDATE",
            Self::GuildRoleDelete => "GUILD_ROLE_DELETE",
            Self::MessageReactionAdd => "MESSAGE_REACTION_ADD",
        }
    }

    /// Parse an event name; names the engine does not consume yield `None`
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "GUILD_MEMBER_ADD" => Some(Self::GuildMemberAdd),
            "GUILD_MEMBER_UPDATE" => Some(Self::GuildMemberUpdate),
            "GUILD_ROLE_DELETE" => Some(Self::GuildRoleDelete),
            "MESSAGE_REACTION_ADD" => Some(Self::MessageReactionAdd),
            _ => None,
        }
    }

    /// All consumed event types, e.g. for building subscription intents
    pub const ALL: [Self; 4] = [
        Self::GuildMemberAdd,
        Self::GuildMemberUpdate,
        Self::GuildRoleDelete,
        Self::MessageReactionAdd,
    ];
}

impl fmt::Display for GatewayEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
