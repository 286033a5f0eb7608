//! Join marker database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for member_joins table
#[derive(Debug, Clone, FromRow)]
pub struct MemberJoinModel {
    pub user_id: i64,
    pub guild_id: i64,
    pub first_joined_at: DateTime<Utc>,
}
