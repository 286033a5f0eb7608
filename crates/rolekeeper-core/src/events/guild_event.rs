//! Guild events - the closed set of lifecycle events the role engine reacts to
//!
//! Raw gateway payloads are decoded into these variants once, at the ingestion
//! boundary; everything downstream works with strongly-typed fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{RoleSet, Snowflake};

/// All events handled by the role engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuildEvent {
    MemberJoined(MemberJoinedEvent),
    MemberRolesUpdated(MemberRolesUpdatedEvent),
    RoleDeleted(GuildRoleDeletedEvent),
    ReactionAdded(ReactionAddedEvent),
}

/// Identifies one member of one guild
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberKey {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
}

impl MemberKey {
    pub fn new(guild_id: Snowflake, user_id: Snowflake) -> Self {
        Self { guild_id, user_id }
    }
}

impl GuildEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MemberJoined(_) => "MEMBER_JOINED",
            Self::MemberRolesUpdated(_) => "MEMBER_ROLES_UPDATED",
            Self::RoleDeleted(_) => "ROLE_DELETED",
            Self::ReactionAdded(_) => "REACTION_ADDED",
        }
    }

    pub fn guild_id(&self) -> Snowflake {
        match self {
            Self::MemberJoined(e) => e.guild_id,
            Self::MemberRolesUpdated(e) => e.guild_id,
            Self::RoleDeleted(e) => e.guild_id,
            Self::ReactionAdded(e) => e.guild_id,
        }
    }

    /// The member this event concerns, if any
    pub fn member_key(&self) -> Option<MemberKey> {
        match self {
            Self::MemberJoined(e) => Some(MemberKey::new(e.guild_id, e.user_id)),
            Self::MemberRolesUpdated(e) => Some(MemberKey::new(e.guild_id, e.user_id)),
            Self::ReactionAdded(e) => Some(MemberKey::new(e.guild_id, e.user_id)),
            Self::RoleDeleted(_) => None,
        }
    }

    /// Key whose events must be handled in arrival order.
    ///
    /// Member events order per (guild, member); role deletions per (guild, role).
    pub fn ordering_key(&self) -> (Snowflake, Snowflake) {
        match self {
            Self::RoleDeleted(e) => (e.guild_id, e.role_id),
            Self::MemberJoined(e) => (e.guild_id, e.user_id),
            Self::MemberRolesUpdated(e) => (e.guild_id, e.user_id),
            Self::ReactionAdded(e) => (e.guild_id, e.user_id),
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::MemberJoined(e) => e.timestamp,
            Self::MemberRolesUpdated(e) => e.timestamp,
            Self::RoleDeleted(e) => e.timestamp,
            Self::ReactionAdded(e) => e.timestamp,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

/// A user joined (or re-joined) a guild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberJoinedEvent {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    /// Roles the member already holds at join time (normally none)
    #[serde(default)]
    pub role_ids: Vec<Snowflake>,
    pub timestamp: DateTime<Utc>,
}

/// A member's role set changed; carries the complete new set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRolesUpdatedEvent {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    pub role_ids: RoleSet,
    pub timestamp: DateTime<Utc>,
}

/// A role was deleted from the guild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildRoleDeletedEvent {
    pub guild_id: Snowflake,
    pub role_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

/// A user added a reaction to a message in a guild channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionAddedEvent {
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub emoji: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Event Creation Helpers
// ============================================================================

impl MemberJoinedEvent {
    pub fn new(guild_id: Snowflake, user_id: Snowflake, role_ids: Vec<Snowflake>) -> Self {
        Self {
            guild_id,
            user_id,
            role_ids,
            timestamp: Utc::now(),
        }
    }
}

impl MemberRolesUpdatedEvent {
    pub fn new(guild_id: Snowflake, user_id: Snowflake, role_ids: RoleSet) -> Self {
        Self {
            guild_id,
            user_id,
            role_ids,
            timestamp: Utc::now(),
        }
    }
}

impl GuildRoleDeletedEvent {
    pub fn new(guild_id: Snowflake, role_id: Snowflake) -> Self {
        Self {
            guild_id,
            role_id,
            timestamp: Utc::now(),
        }
    }
}

impl ReactionAddedEvent {
    pub fn new(
        guild_id: Snowflake,
        channel_id: Snowflake,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: impl Into<String>,
    ) -> Self {
        Self {
            guild_id,
            channel_id,
            message_id,
            user_id,
            emoji: emoji.into(),
            timestamp: Utc::now(),
        }
    }
}

impl From<MemberJoinedEvent> for GuildEvent {
    fn from(e: MemberJoinedEvent) -> Self {
        Self::MemberJoined(e)
    }
}

impl From<MemberRolesUpdatedEvent> for GuildEvent {
    fn from(e: MemberRolesUpdatedEvent) -> Self {
        Self::MemberRolesUpdated(e)
    }
}

impl From<GuildRoleDeletedEvent> for GuildEvent {
    fn from(e: GuildRoleDeletedEvent) -> Self {
        Self::RoleDeleted(e)
    }
}

impl From<ReactionAddedEvent> for GuildEvent {
    fn from(e: ReactionAddedEvent) -> Self {
        Self::ReactionAdded(e)
    }
}
