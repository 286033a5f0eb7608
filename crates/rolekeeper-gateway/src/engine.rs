//! Role engine lifecycle
//!
//! Startup order: post the reaction role menu, sync the guild into the mirror,
//! then accept events.

use std::sync::Arc;

use rolekeeper_common::DispatchConfig;
use rolekeeper_core::GuildEvent;
use rolekeeper_service::{
    BulkAssignReport, BulkRoleAssigner, GuildSyncer, ReactionRoleSession,
    ReactionToggleController, ServiceContext,
};
use tracing::{error, info, instrument};

use crate::dispatch::EventDispatcher;
use crate::error::GatewayError;
use crate::events::{decode_dispatch, decode_frame};

/// A started role engine
pub struct RoleEngine {
    ctx: ServiceContext,
    session: Arc<ReactionRoleSession>,
    dispatcher: EventDispatcher,
}

impl RoleEngine {
    /// Run startup and begin accepting events.
    ///
    /// # Errors
    /// Fails if the reaction role menu cannot be set up. A failed initial sync
    /// is logged and startup continues.
    #[instrument(skip_all, fields(guild_id = %ctx.settings().guild_id))]
    pub async fn start(ctx: ServiceContext, config: &DispatchConfig) -> Result<Self, GatewayError> {
        let roles = ctx.settings().reaction_roles.clone();
        let session = ReactionToggleController::new(&ctx).initialize(&roles).await?;

        let guild_id = ctx.settings().guild_id;
        match GuildSyncer::new(&ctx).sync_guild(guild_id).await {
            Ok(mirrored) => info!(mirrored, "Initial guild sync complete"),
            Err(e) => error!(error = %e, code = e.error_code(), "Initial guild sync failed"),
        }

        let session = Arc::new(session);
        let dispatcher = EventDispatcher::start(ctx.clone(), Arc::clone(&session), config.shards);

        info!(message_id = %session.message_id, "Role engine started");

        Ok(Self {
            ctx,
            session,
            dispatcher,
        })
    }

    /// The live reaction role menu
    pub fn session(&self) -> &ReactionRoleSession {
        &self.session
    }

    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    /// Queue a decoded event
    pub async fn dispatch(&self, event: GuildEvent) -> Result<u64, GatewayError> {
        self.dispatcher.dispatch(event).await
    }

    /// Decode and queue one dispatch payload.
    ///
    /// Returns `None` for events the engine ignores.
    pub async fn ingest(
        &self,
        event_name: &str,
        data: serde_json::Value,
    ) -> Result<Option<u64>, GatewayError> {
        match decode_dispatch(event_name, data)? {
            Some(event) => self.dispatch(event).await.map(Some),
            None => Ok(None),
        }
    }

    /// Decode and queue one raw gateway frame
    pub async fn ingest_frame(&self, raw: &str) -> Result<Option<u64>, GatewayError> {
        match decode_frame(raw)? {
            Some(event) => self.dispatch(event).await.map(Some),
            None => Ok(None),
        }
    }

    /// Rewrite the mirror from the live member list
    pub async fn resync(&self) -> Result<usize, GatewayError> {
        let guild_id = self.ctx.settings().guild_id;
        Ok(GuildSyncer::new(&self.ctx).sync_guild(guild_id).await?)
    }

    /// Grant the default member role to everyone lacking it
    pub async fn assign_default_role_to_all(&self) -> Result<BulkAssignReport, GatewayError> {
        let settings = self.ctx.settings();
        Ok(BulkRoleAssigner::new(&self.ctx)
            .assign_role_to_all(settings.guild_id, settings.default_role_id)
            .await?)
    }

    /// Stop accepting events and wait for queued ones to finish
    pub async fn shutdown(self) {
        self.dispatcher.shutdown().await;
        info!("Role engine stopped");
    }
}
