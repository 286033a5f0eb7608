//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs from the role mirror store; the
//! infrastructure layer provides the implementation.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::value_objects::{RoleSet, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Role Mirror Repository
// ============================================================================

/// Durable record of each member's roles and of who has ever joined.
///
/// Rows are keyed by `(user, guild)`; a guild never sees another guild's rows.
/// After `replace_roles(u, g, s)` returns `Ok`, `get_roles(u, g)` yields exactly
/// `s` until the next write for that pair.
#[async_trait]
pub trait RoleMirrorRepository: Send + Sync {
    /// Atomically replace the stored role set for a member.
    ///
    /// An empty set clears the member's entries. On failure the previous set
    /// remains intact.
    async fn replace_roles(
        &self,
        user_id: Snowflake,
        guild_id: Snowflake,
        roles: &RoleSet,
    ) -> RepoResult<()>;

    /// Stored role set for a member; empty when nothing is recorded
    async fn get_roles(&self, user_id: Snowflake, guild_id: Snowflake) -> RepoResult<RoleSet>;

    /// Whether the member has ever been marked as joined
    async fn has_joined_before(&self, user_id: Snowflake, guild_id: Snowflake)
        -> RepoResult<bool>;

    /// Record the first join. Idempotent.
    async fn mark_joined(&self, user_id: Snowflake, guild_id: Snowflake) -> RepoResult<()>;

    /// Remove `role_id` from every member of the guild; returns how many
    /// entries were removed
    async fn purge_role(&self, guild_id: Snowflake, role_id: Snowflake) -> RepoResult<u64>;
}
