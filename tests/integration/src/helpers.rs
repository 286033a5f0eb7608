//! Test helpers for integration tests
//!
//! [`TestEngine`] starts a [`RoleEngine`] on a fresh in-memory SQLite mirror
//! and a [`FakeGuild`]. Event handling is asynchronous; call
//! [`TestEngine::drain`] before asserting on its effects.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use rolekeeper_common::DispatchConfig;
use rolekeeper_core::traits::RoleMirrorRepository;
use rolekeeper_core::{RoleSet, Snowflake};
use rolekeeper_db::{create_memory_pool, run_migrations, SqliteRoleMirrorRepository};
use rolekeeper_gateway::RoleEngine;
use rolekeeper_service::{EngineSettings, ServiceContext};

use crate::fixtures::{
    reaction_roles, FakeGuild, FaultyMirror, BOT, GUILD, MEMBER_ROLE, ROLES_CHANNEL,
};

/// Shard workers in every test engine
pub const TEST_SHARDS: usize = 4;

/// Engine settings used by the integration tests
pub fn test_settings() -> EngineSettings {
    let mut settings =
        EngineSettings::new(GUILD, BOT, MEMBER_ROLE, ROLES_CHANNEL, reaction_roles());
    settings.notice_ttl = Duration::from_secs(1);
    settings.bulk_assign_interval = Duration::from_millis(5);
    settings
}

/// Fresh mirror store with the schema applied
pub async fn memory_mirror() -> Result<Arc<FaultyMirror>> {
    let pool = create_memory_pool().await?;
    run_migrations(&pool).await?;
    let mirror = SqliteRoleMirrorRepository::new(pool);
    Ok(Arc::new(FaultyMirror::new(mirror)))
}

pub fn service_context(
    guild: &Arc<FakeGuild>,
    mirror: &Arc<FaultyMirror>,
    settings: EngineSettings,
) -> ServiceContext {
    ServiceContext::new(
        mirror.clone(),
        guild.clone(),
        guild.clone(),
        guild.clone(),
        settings,
    )
}

/// A running engine plus handles on its collaborators
pub struct TestEngine {
    pub guild: Arc<FakeGuild>,
    pub mirror: Arc<FaultyMirror>,
    pub engine: RoleEngine,
}

/// Collaborators left behind once the engine has stopped
pub struct Settled {
    pub guild: Arc<FakeGuild>,
    pub mirror: Arc<FaultyMirror>,
}

impl TestEngine {
    pub async fn start(guild: FakeGuild) -> Result<Self> {
        Self::start_with(guild, test_settings()).await
    }

    pub async fn start_with(guild: FakeGuild, settings: EngineSettings) -> Result<Self> {
        let guild = Arc::new(guild);
        let mirror = memory_mirror().await?;
        let ctx = service_context(&guild, &mirror, settings);

        let engine = RoleEngine::start(ctx, &DispatchConfig { shards: TEST_SHARDS }).await?;

        Ok(Self {
            guild,
            mirror,
            engine,
        })
    }

    /// Control message posted at startup
    pub fn control_message(&self) -> Snowflake {
        self.engine.session().message_id
    }

    /// Deliver one dispatch payload
    pub async fn send(&self, event_name: &str, data: serde_json::Value) -> Result<()> {
        self.engine.ingest(event_name, data).await?;
        Ok(())
    }

    /// Shut the engine down, waiting for every queued event to finish
    pub async fn drain(self) -> Settled {
        self.engine.shutdown().await;
        Settled {
            guild: self.guild,
            mirror: self.mirror,
        }
    }
}

impl Settled {
    pub async fn mirrored(&self, user_id: Snowflake) -> Result<RoleSet> {
        Ok(self.mirror.get_roles(user_id, GUILD).await?)
    }

    pub async fn has_joined(&self, user_id: Snowflake) -> Result<bool> {
        Ok(self.mirror.has_joined_before(user_id, GUILD).await?)
    }
}

/// Poll `condition` every 10 ms until it holds or `timeout` passes
pub async fn wait_until<F>(timeout: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

pub mod payloads {
    //! Dispatch payload builders

    use serde_json::{json, Value};

    use crate::fixtures::GUILD;

    pub fn member_add(user_id: i64) -> Value {
        json!({
            "guild_id": GUILD.to_string(),
            "user": { "id": user_id.to_string(), "username": "someone" },
            "roles": [],
            "joined_at": "2024-01-01T00:00:00.000000+00:00"
        })
    }

    pub fn member_update(user_id: i64, roles: &[i64]) -> Value {
        json!({
            "guild_id": GUILD.to_string(),
            "user": { "id": user_id.to_string() },
            "roles": roles.iter().map(ToString::to_string).collect::<Vec<_>>()
        })
    }

    pub fn role_delete(role_id: i64) -> Value {
        json!({ "guild_id": GUILD.to_string(), "role_id": role_id.to_string() })
    }

    pub fn reaction_add(user_id: i64, channel_id: i64, message_id: i64, emoji: &str) -> Value {
        json!({
            "user_id": user_id.to_string(),
            "channel_id": channel_id.to_string(),
            "message_id": message_id.to_string(),
            "guild_id": GUILD.to_string(),
            "emoji": { "id": null, "name": emoji }
        })
    }
}
