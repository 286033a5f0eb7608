//! Sticky role database model

use sqlx::FromRow;

/// Database model for sticky_roles table
#[derive(Debug, Clone, FromRow)]
pub struct StickyRoleModel {
    pub user_id: i64,
    pub guild_id: i64,
    pub role_id: i64,
}
