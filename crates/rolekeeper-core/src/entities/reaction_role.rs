//! Reaction role definition - which emoji on the control message toggles which role

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// One configured (role, display name, emoji) entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ReactionRoleDefinition {
    pub role_id: Snowflake,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Unicode emoji, or `name:id` for a custom emoji
    #[validate(length(min = 1, max = 64))]
    pub emoji: String,
}

impl ReactionRoleDefinition {
    pub fn new(role_id: Snowflake, name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            role_id,
            name: name.into(),
            emoji: emoji.into(),
        }
    }

    /// Check the definition is usable on the control message
    pub fn check(&self) -> Result<(), DomainError> {
        if self.role_id.is_zero() {
            return Err(DomainError::Configuration(format!(
                "reaction role {:?} has no role ID",
                self.name
            )));
        }
        self.validate().map_err(|e| {
            DomainError::Configuration(format!("reaction role {}: {e}", self.role_id))
        })
    }

    /// Line used in the control message embed
    pub fn menu_line(&self) -> String {
        format!("{} - {}", self.emoji, self.name)
    }

    #[inline]
    pub fn matches_emoji(&self, emoji: &str) -> bool {
        self.emoji == emoji
    }
}
