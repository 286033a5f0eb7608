//! Event ingestor
//!
//! Bridges membership lifecycle events to the reconciliation policy, the
//! role mirror and the live guild.

use rolekeeper_core::events::{GuildRoleDeletedEvent, MemberJoinedEvent, MemberRolesUpdatedEvent};
use rolekeeper_core::{JoinDecision, MirrorWriteDecision, ReconciliationPolicy, Snowflake};
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// What a member-join handling did live
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinOutcome {
    pub first_join: bool,
    pub granted: Vec<Snowflake>,
    pub failed: Vec<Snowflake>,
}

/// Event ingestor
pub struct EventIngestor<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventIngestor<'a> {
    /// Create a new EventIngestor
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Grant the default role on a first join, restore mirrored roles on a return
    #[instrument(skip(self, event), fields(guild_id = %event.guild_id, user_id = %event.user_id))]
    pub async fn handle_member_join(
        &self,
        event: &MemberJoinedEvent,
    ) -> ServiceResult<JoinOutcome> {
        let mirror = self.ctx.mirror();
        let default_role = self.ctx.settings().default_role_id;

        let mirrored = mirror.get_roles(event.user_id, event.guild_id).await?;
        let joined_before = mirror
            .has_joined_before(event.user_id, event.guild_id)
            .await?;

        let decision = ReconciliationPolicy::on_member_join(joined_before, mirrored, default_role);

        let mut outcome = JoinOutcome {
            first_join: decision.is_first_join(),
            ..JoinOutcome::default()
        };

        match decision {
            JoinDecision::FirstJoin { assign } => {
                // A failed marker write only means the next join counts as first again
                if let Err(e) = mirror.mark_joined(event.user_id, event.guild_id).await {
                    warn!(error = %e, "Failed to record first join");
                }

                for role_id in assign {
                    if event.role_ids.contains(&role_id) {
                        debug!(role_id = %role_id, "Member already holds default role");
                        continue;
                    }
                    self.grant(event, role_id, &mut outcome).await;
                }

                info!(granted = outcome.granted.len(), "First join handled");
            }
            JoinDecision::Returning { assign } => {
                for role_id in assign {
                    self.grant(event, role_id, &mut outcome).await;
                }

                if outcome.granted.is_empty() && outcome.failed.is_empty() {
                    debug!("Returning member has no mirrored roles");
                } else {
                    info!(
                        restored = outcome.granted.len(),
                        failed = outcome.failed.len(),
                        "Restored roles for returning member"
                    );
                }
            }
        }

        Ok(outcome)
    }

    /// Mirror the member's complete new role set
    #[instrument(skip(self, event), fields(guild_id = %event.guild_id, user_id = %event.user_id))]
    pub async fn handle_member_role_set_changed(
        &self,
        event: &MemberRolesUpdatedEvent,
    ) -> ServiceResult<()> {
        let MirrorWriteDecision::ReplaceWith(roles) =
            ReconciliationPolicy::on_member_role_set_changed(event.role_ids.clone());

        self.ctx
            .mirror()
            .replace_roles(event.user_id, event.guild_id, &roles)
            .await?;

        debug!(role_count = roles.len(), "Mirror updated");
        Ok(())
    }

    /// Drop a deleted role from every member's mirror; returns the removed entry count
    #[instrument(skip(self, event), fields(guild_id = %event.guild_id, role_id = %event.role_id))]
    pub async fn handle_guild_role_deleted(
        &self,
        event: &GuildRoleDeletedEvent,
    ) -> ServiceResult<u64> {
        let decision = ReconciliationPolicy::on_guild_role_deleted(event.role_id);

        let removed = self
            .ctx
            .mirror()
            .purge_role(event.guild_id, decision.role_id)
            .await?;

        info!(removed, "Purged deleted role from mirror");
        Ok(removed)
    }

    async fn grant(
        &self,
        event: &MemberJoinedEvent,
        role_id: Snowflake,
        outcome: &mut JoinOutcome,
    ) {
        match self
            .ctx
            .role_mutator()
            .grant_role(event.guild_id, event.user_id, role_id)
            .await
        {
            Ok(()) => outcome.granted.push(role_id),
            Err(e) => {
                warn!(role_id = %role_id, error = %e, code = e.code(), "Failed to grant role");
                outcome.failed.push(role_id);
            }
        }
    }
}
