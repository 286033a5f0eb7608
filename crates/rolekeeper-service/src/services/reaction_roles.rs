//! Reaction role toggle controller
//!
//! Owns the single control message listing the self-assignable roles. Each
//! reaction on it toggles one role for the reacting member.

use rolekeeper_core::entities::CONTROL_MESSAGE_COLOR;
use rolekeeper_core::events::ReactionAddedEvent;
use rolekeeper_core::{Embed, ReactionRoleDefinition, Snowflake};
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notices::{schedule_deletion, toggle_notice};

pub const CONTROL_MESSAGE_TITLE: &str = "Reaction Roles";

/// How many existing messages are cleared from the channel on initialization
const CHANNEL_CLEAR_LIMIT: u32 = 100;

/// The live control message and the roles it offers.
///
/// Held in memory only; a restart posts a fresh control message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionRoleSession {
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub roles: Vec<ReactionRoleDefinition>,
}

impl ReactionRoleSession {
    /// Role offered under `emoji`, if any
    pub fn role_for_emoji(&self, emoji: &str) -> Option<&ReactionRoleDefinition> {
        self.roles.iter().find(|r| r.matches_emoji(emoji))
    }
}

/// What a reaction did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The bot's own reaction
    IgnoredSelf,
    /// Reaction on some other message
    IgnoredOtherMessage,
    /// Emoji not offered on the control message
    IgnoredUnknownEmoji,
    /// Live lookup or mutation failed; nothing was toggled
    Aborted,
    Granted(Snowflake),
    Revoked(Snowflake),
}

/// Reaction role toggle controller
pub struct ReactionToggleController<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionToggleController<'a> {
    /// Create a new ReactionToggleController
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Clear the control channel, post the role menu and seed its reactions.
    ///
    /// # Errors
    /// Fails on an empty or invalid role list, or if the menu cannot be posted.
    #[instrument(skip(self, roles), fields(role_count = roles.len()))]
    pub async fn initialize(
        &self,
        roles: &[ReactionRoleDefinition],
    ) -> ServiceResult<ReactionRoleSession> {
        if roles.is_empty() {
            return Err(ServiceError::configuration("no reaction roles configured"));
        }
        for role in roles {
            role.check()?;
        }

        let channel_id = self.ctx.settings().reaction_roles_channel_id;
        let messaging = self.ctx.messaging();

        match messaging.list_messages(channel_id, CHANNEL_CLEAR_LIMIT).await {
            Ok(existing) => {
                for message_id in existing {
                    if let Err(e) = messaging.delete_message(channel_id, message_id).await {
                        warn!(message_id = %message_id, error = %e, "Failed to clear old message");
                    }
                }
            }
            Err(e) => warn!(error = %e, "Failed to list control channel messages"),
        }

        let menu = Embed::new(
            CONTROL_MESSAGE_TITLE,
            menu_description(roles),
            CONTROL_MESSAGE_COLOR,
        );
        let posted = messaging.post_embed(channel_id, &menu).await?;

        for role in roles {
            if let Err(e) = messaging
                .add_reaction(channel_id, posted.message_id, &role.emoji)
                .await
            {
                warn!(emoji = %role.emoji, error = %e, "Failed to add menu reaction");
            }
        }

        info!(message_id = %posted.message_id, "Reaction roles message posted");

        Ok(ReactionRoleSession {
            channel_id,
            message_id: posted.message_id,
            roles: roles.to_vec(),
        })
    }

    /// Toggle the role behind a reaction on the control message.
    ///
    /// Failures are logged and never reported to the member.
    #[instrument(
        skip(self, event, session),
        fields(user_id = %event.user_id, emoji = %event.emoji)
    )]
    pub async fn handle_reaction_added(
        &self,
        event: &ReactionAddedEvent,
        session: &ReactionRoleSession,
    ) -> ToggleOutcome {
        if event.user_id == self.ctx.settings().bot_user_id {
            return ToggleOutcome::IgnoredSelf;
        }
        if event.message_id != session.message_id {
            return ToggleOutcome::IgnoredOtherMessage;
        }
        let Some(definition) = session.role_for_emoji(&event.emoji) else {
            debug!("Emoji not on the menu");
            return ToggleOutcome::IgnoredUnknownEmoji;
        };
        let role_id = definition.role_id;

        let member = match self
            .ctx
            .directory()
            .get_member(event.guild_id, event.user_id)
            .await
        {
            Ok(member) => member,
            Err(e) => {
                debug!(error = %e, "Member lookup failed, dropping reaction");
                return ToggleOutcome::Aborted;
            }
        };

        let mutator = self.ctx.role_mutator();
        let (result, outcome) = if member.has_role(role_id) {
            (
                mutator.revoke_role(event.guild_id, event.user_id, role_id).await,
                ToggleOutcome::Revoked(role_id),
            )
        } else {
            (
                mutator.grant_role(event.guild_id, event.user_id, role_id).await,
                ToggleOutcome::Granted(role_id),
            )
        };

        let messaging = self.ctx.messaging();

        // Removed even after a failed toggle so the member can react again
        if let Err(e) = messaging
            .remove_reaction(event.channel_id, event.message_id, &event.emoji, event.user_id)
            .await
        {
            debug!(error = %e, "Failed to remove member reaction");
        }

        if let Err(e) = result {
            warn!(role_id = %role_id, error = %e, code = e.code(), "Role toggle failed");
            return ToggleOutcome::Aborted;
        }

        let ttl = self.ctx.settings().notice_ttl;
        let notice = toggle_notice(
            event.user_id,
            role_id,
            matches!(outcome, ToggleOutcome::Granted(_)),
            ttl,
        );
        match messaging.post_embed(event.channel_id, &notice).await {
            Ok(posted) => {
                schedule_deletion(self.ctx.messaging_handle(), posted, ttl);
            }
            Err(e) => debug!(error = %e, "Failed to post toggle notice"),
        }

        info!(role_id = %role_id, ?outcome, "Reaction role toggled");
        outcome
    }
}

fn menu_description(roles: &[ReactionRoleDefinition]) -> String {
    roles
        .iter()
        .map(ReactionRoleDefinition::menu_line)
        .collect::<Vec<_>>()
        .join("\n")
}
