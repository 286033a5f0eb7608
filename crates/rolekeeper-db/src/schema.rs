//! Schema bootstrap
//!
//! Every statement is idempotent, so this runs on each startup.

use sqlx::sqlite::SqlitePool;
use tracing::info;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS sticky_roles (
        user_id  INTEGER NOT NULL,
        guild_id INTEGER NOT NULL,
        role_id  INTEGER NOT NULL,
        PRIMARY KEY (user_id, guild_id, role_id)
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_sticky_roles_guild_role
        ON sticky_roles (guild_id, role_id)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS member_joins (
        user_id         INTEGER NOT NULL,
        guild_id        INTEGER NOT NULL,
        first_joined_at TEXT NOT NULL,
        PRIMARY KEY (user_id, guild_id)
    )
    "#,
];

/// Create the mirror tables and indexes if they do not exist yet
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(*statement).execute(pool).await?;
    }
    info!(statements = SCHEMA.len(), "Role mirror schema ready");
    Ok(())
}
