//! SQLite implementation of RoleMirrorRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use tracing::{debug, instrument};

use rolekeeper_core::traits::{RepoResult, RoleMirrorRepository};
use rolekeeper_core::value_objects::{RoleSet, Snowflake};

use crate::mappers::role_set_from_rows;
use crate::models::{MemberJoinModel, StickyRoleModel};

use super::error::{map_db_error, map_tx_error};

/// SQLite implementation of RoleMirrorRepository
#[derive(Clone)]
pub struct SqliteRoleMirrorRepository {
    pool: SqlitePool,
}

impl SqliteRoleMirrorRepository {
    /// Create a new SqliteRoleMirrorRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for callers that need to close it on shutdown
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// When the member's first join was recorded, if ever
    #[instrument(skip(self))]
    pub async fn first_joined_at(
        &self,
        user_id: Snowflake,
        guild_id: Snowflake,
    ) -> RepoResult<Option<DateTime<Utc>>> {
        let marker = sqlx::query_as::<_, MemberJoinModel>(
            r#"
            SELECT user_id, guild_id, first_joined_at
            FROM member_joins
            WHERE user_id = ? AND guild_id = ?
            "#,
        )
        .bind(user_id.into_inner())
        .bind(guild_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(marker.map(|m| m.first_joined_at))
    }
}

#[async_trait]
impl RoleMirrorRepository for SqliteRoleMirrorRepository {
    #[instrument(skip(self, roles), fields(role_count = roles.len()))]
    async fn replace_roles(
        &self,
        user_id: Snowflake,
        guild_id: Snowflake,
        roles: &RoleSet,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_tx_error("begin"))?;

        sqlx::query(
            r#"
            DELETE FROM sticky_roles WHERE user_id = ? AND guild_id = ?
            "#,
        )
        .bind(user_id.into_inner())
        .bind(guild_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for role_id in roles {
            sqlx::query(
                r#"
                INSERT INTO sticky_roles (user_id, guild_id, role_id) VALUES (?, ?, ?)
                "#,
            )
            .bind(user_id.into_inner())
            .bind(guild_id.into_inner())
            .bind(role_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        // Dropping `tx` on any early return above rolls it back
        tx.commit().await.map_err(map_tx_error("commit"))?;

        debug!("Mirror rewritten");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_roles(&self, user_id: Snowflake, guild_id: Snowflake) -> RepoResult<RoleSet> {
        let rows = sqlx::query_as::<_, StickyRoleModel>(
            r#"
            SELECT user_id, guild_id, role_id
            FROM sticky_roles
            WHERE user_id = ? AND guild_id = ?
            "#,
        )
        .bind(user_id.into_inner())
        .bind(guild_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(role_set_from_rows(rows))
    }

    #[instrument(skip(self))]
    async fn has_joined_before(
        &self,
        user_id: Snowflake,
        guild_id: Snowflake,
    ) -> RepoResult<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM member_joins WHERE user_id = ? AND guild_id = ?
            "#,
        )
        .bind(user_id.into_inner())
        .bind(guild_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn mark_joined(&self, user_id: Snowflake, guild_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO member_joins (user_id, guild_id, first_joined_at)
            VALUES (?, ?, ?)
            ON CONFLICT (user_id, guild_id) DO NOTHING
            "#,
        )
        .bind(user_id.into_inner())
        .bind(guild_id.into_inner())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            debug!("Join marker already present");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn purge_role(&self, guild_id: Snowflake, role_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM sticky_roles WHERE guild_id = ? AND role_id = ?
            "#,
        )
        .bind(guild_id.into_inner())
        .bind(role_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
