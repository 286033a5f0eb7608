//! Row to domain conversions

use rolekeeper_core::value_objects::{RoleSet, Snowflake};

use crate::models::StickyRoleModel;

/// Collapse a member's sticky role rows into a role set
pub fn role_set_from_rows(rows: Vec<StickyRoleModel>) -> RoleSet {
    rows.into_iter().map(|row| Snowflake::new(row.role_id)).collect()
}
