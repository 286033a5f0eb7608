use serde::{Deserialize, Serialize};

use crate::value_objects::{RoleSet, Snowflake};

/// What to do when a member joins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JoinDecision {
    /// Never seen before: record the join marker and grant `assign`
    FirstJoin { assign: RoleSet },
    /// Seen before: restore `assign` (may be empty)
    Returning { assign: RoleSet },
}

impl JoinDecision {
    /// Roles to grant live
    pub fn roles_to_assign(&self) -> &RoleSet {
        match self {
            Self::FirstJoin { assign } | Self::Returning { assign } => assign,
        }
    }

    pub fn is_first_join(&self) -> bool {
        matches!(self, Self::FirstJoin { .. })
    }
}

/// How the mirror follows a live role-set change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorWriteDecision {
    /// Overwrite the stored set; last write wins
    ReplaceWith(RoleSet),
}

/// Mirror cleanup after a guild-level role deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeDecision {
    pub role_id: Snowflake,
}

/// Decision logic shared by the event ingestor and the tests.
///
/// No I/O: every input is passed in, every effect is returned as a decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationPolicy;

impl ReconciliationPolicy {
    /// First join grants exactly the default role, whatever the mirror says.
    /// A returning member gets exactly the mirrored roles and never the default.
    pub fn on_member_join(
        has_joined_before: bool,
        mirrored_roles: RoleSet,
        default_role: Snowflake,
    ) -> JoinDecision {
        if has_joined_before {
            JoinDecision::Returning {
                assign: mirrored_roles,
            }
        } else {
            JoinDecision::FirstJoin {
                assign: RoleSet::from([default_role]),
            }
        }
    }

    pub fn on_member_role_set_changed(new_roles: RoleSet) -> MirrorWriteDecision {
        MirrorWriteDecision::ReplaceWith(new_roles)
    }

    pub fn on_guild_role_deleted(role_id: Snowflake) -> PurgeDecision {
        PurgeDecision { role_id }
    }
}
