//! Live-guild collaborator traits (ports)
//!
//! The engine talks to the chat platform only through these traits. Adapters
//! map platform failures onto [`DomainError`] variants (rate limits, missing
//! permissions, unknown objects).

use async_trait::async_trait;

use crate::entities::{Embed, GuildMember, PostedMessage};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for calls to the live platform
pub type ApiResult<T> = Result<T, DomainError>;

// ============================================================================
// Guild Directory
// ============================================================================

/// Read access to the live member list
#[async_trait]
pub trait GuildDirectory: Send + Sync {
    /// List up to `limit` members with user ID greater than `after`, in
    /// ascending user ID order
    async fn list_members(
        &self,
        guild_id: Snowflake,
        after: Option<Snowflake>,
        limit: u32,
    ) -> ApiResult<Vec<GuildMember>>;

    /// Fetch one member with their current roles
    async fn get_member(&self, guild_id: Snowflake, user_id: Snowflake)
        -> ApiResult<GuildMember>;
}

// ============================================================================
// Guild Role Mutator
// ============================================================================

#[async_trait]
pub trait GuildRoleMutator: Send + Sync {
    async fn grant_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> ApiResult<()>;

    async fn revoke_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> ApiResult<()>;
}

// ============================================================================
// Messaging Surface
// ============================================================================

/// Channel messages and reactions
#[async_trait]
pub trait MessagingSurface: Send + Sync {
    async fn post_embed(&self, channel_id: Snowflake, embed: &Embed) -> ApiResult<PostedMessage>;

    async fn delete_message(&self, channel_id: Snowflake, message_id: Snowflake)
        -> ApiResult<()>;

    /// Add a reaction as the bot itself
    async fn add_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> ApiResult<()>;

    /// Remove one user's reaction
    async fn remove_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
        user_id: Snowflake,
    ) -> ApiResult<()>;

    /// IDs of the most recent messages in a channel, newest first
    async fn list_messages(&self, channel_id: Snowflake, limit: u32) -> ApiResult<Vec<Snowflake>>;
}
