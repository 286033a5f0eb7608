//! Member entity - a live snapshot of a user's membership in a guild

use serde::{Deserialize, Serialize};

use crate::value_objects::{RoleSet, Snowflake};

/// Guild member as reported by the guild directory
///
/// `role_ids` is the live role list at the time the snapshot was taken; the
/// directory never includes the implicit @everyone role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMember {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    #[serde(default)]
    pub role_ids: Vec<Snowflake>,
}

impl GuildMember {
    pub fn new(guild_id: Snowflake, user_id: Snowflake, role_ids: Vec<Snowflake>) -> Self {
        Self {
            guild_id,
            user_id,
            role_ids,
        }
    }

    /// Check if member has a specific role
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.role_ids.contains(&role_id)
    }

    #[inline]
    pub fn has_any_role(&self) -> bool {
        !self.role_ids.is_empty()
    }

    /// Role list as a set (duplicates collapse)
    pub fn role_set(&self) -> RoleSet {
        self.role_ids.iter().copied().collect()
    }
}
