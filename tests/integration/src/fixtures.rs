//! Test fixtures
//!
//! [`FakeGuild`] plays the live guild: member directory, role mutation and
//! messaging, with every side effect recorded for assertions.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use parking_lot::Mutex;

use rolekeeper_core::traits::{
    ApiResult, GuildDirectory, GuildRoleMutator, MessagingSurface, RepoResult,
    RoleMirrorRepository,
};
use rolekeeper_core::{
    DomainError, Embed, GuildMember, PostedMessage, ReactionRoleDefinition, RoleSet, Snowflake,
};
use rolekeeper_db::SqliteRoleMirrorRepository;

pub const GUILD: Snowflake = Snowflake::new(100);
pub const BOT: Snowflake = Snowflake::new(1);
pub const MEMBER_ROLE: Snowflake = Snowflake::new(500);
pub const ROLES_CHANNEL: Snowflake = Snowflake::new(900);
pub const RED_ROLE: Snowflake = Snowflake::new(601);
pub const BLUE_ROLE: Snowflake = Snowflake::new(602);

pub fn sf(id: i64) -> Snowflake {
    Snowflake::new(id)
}

pub fn role_set(ids: &[i64]) -> RoleSet {
    ids.iter().copied().map(Snowflake::new).collect()
}

pub fn reaction_roles() -> Vec<ReactionRoleDefinition> {
    vec![
        ReactionRoleDefinition::new(RED_ROLE, "Red", "🔴"),
        ReactionRoleDefinition::new(BLUE_ROLE, "Blue", "🔵"),
    ]
}

/// A role change performed on the live guild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    Granted { user_id: Snowflake, role_id: Snowflake },
    Revoked { user_id: Snowflake, role_id: Snowflake },
}

/// In-memory live guild
#[derive(Default)]
pub struct FakeGuild {
    members: DashMap<Snowflake, RoleSet>,
    /// Messages already in the control channel before startup
    channel_backlog: Mutex<Vec<Snowflake>>,
    pub role_changes: Mutex<Vec<RoleChange>>,
    pub posted: Mutex<Vec<(PostedMessage, Embed)>>,
    pub deleted: Mutex<Vec<Snowflake>>,
    pub bot_reactions: Mutex<Vec<(Snowflake, String)>>,
    pub removed_reactions: Mutex<Vec<(Snowflake, String, Snowflake)>>,
    pub fail_listing: Mutex<bool>,
    pub failing_grants: Mutex<HashSet<Snowflake>>,
    next_message_id: AtomicI64,
}

impl FakeGuild {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member holding `roles`
    pub fn with_member(self, user_id: i64, roles: &[i64]) -> Self {
        self.members.insert(sf(user_id), role_set(roles));
        self
    }

    pub fn with_channel_backlog(self, message_ids: &[i64]) -> Self {
        self.channel_backlog
            .lock()
            .extend(message_ids.iter().copied().map(Snowflake::new));
        self
    }

    /// A user enters the guild with no roles
    pub fn join(&self, user_id: Snowflake) {
        self.members.insert(user_id, RoleSet::new());
    }

    pub fn leave(&self, user_id: Snowflake) {
        self.members.remove(&user_id);
    }

    /// Change a member's roles directly, as a moderator would
    pub fn set_roles(&self, user_id: Snowflake, roles: RoleSet) {
        self.members.insert(user_id, roles);
    }

    pub fn roles_of(&self, user_id: Snowflake) -> RoleSet {
        self.members
            .get(&user_id)
            .map(|held| held.value().clone())
            .unwrap_or_default()
    }

    pub fn grants(&self) -> Vec<(Snowflake, Snowflake)> {
        self.role_changes
            .lock()
            .iter()
            .filter_map(|change| match *change {
                RoleChange::Granted { user_id, role_id } => Some((user_id, role_id)),
                RoleChange::Revoked { .. } => None,
            })
            .collect()
    }

    /// Posted messages whose embed has the given title
    pub fn posted_titled(&self, title: &str) -> Vec<(PostedMessage, Embed)> {
        self.posted
            .lock()
            .iter()
            .filter(|(_, embed)| embed.title == title)
            .cloned()
            .collect()
    }

    pub fn was_deleted(&self, message_id: Snowflake) -> bool {
        self.deleted.lock().contains(&message_id)
    }

    fn next_message_id(&self) -> Snowflake {
        Snowflake::new(50_000 + self.next_message_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl GuildDirectory for FakeGuild {
    async fn list_members(
        &self,
        guild_id: Snowflake,
        after: Option<Snowflake>,
        limit: u32,
    ) -> ApiResult<Vec<GuildMember>> {
        if *self.fail_listing.lock() {
            return Err(DomainError::ExternalService("502 Bad Gateway".to_string()));
        }

        let mut members: Vec<GuildMember> = self
            .members
            .iter()
            .filter(|entry| after.map_or(true, |a| *entry.key() > a))
            .map(|entry| {
                GuildMember::new(guild_id, *entry.key(), entry.value().iter().copied().collect())
            })
            .collect();
        members.sort_by_key(|m| m.user_id);
        members.truncate(limit as usize);
        Ok(members)
    }

    async fn get_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ApiResult<GuildMember> {
        self.members
            .get(&user_id)
            .map(|held| GuildMember::new(guild_id, user_id, held.iter().copied().collect()))
            .ok_or(DomainError::UnknownMember(user_id))
    }
}

#[async_trait]
impl GuildRoleMutator for FakeGuild {
    async fn grant_role(
        &self,
        _guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> ApiResult<()> {
        if self.failing_grants.lock().contains(&role_id) {
            return Err(DomainError::MissingPermission("MANAGE_ROLES".to_string()));
        }
        let Some(mut held) = self.members.get_mut(&user_id) else {
            return Err(DomainError::UnknownMember(user_id));
        };
        held.insert(role_id);
        self.role_changes
            .lock()
            .push(RoleChange::Granted { user_id, role_id });
        Ok(())
    }

    async fn revoke_role(
        &self,
        _guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> ApiResult<()> {
        let Some(mut held) = self.members.get_mut(&user_id) else {
            return Err(DomainError::UnknownMember(user_id));
        };
        held.remove(&role_id);
        self.role_changes
            .lock()
            .push(RoleChange::Revoked { user_id, role_id });
        Ok(())
    }
}

#[async_trait]
impl MessagingSurface for FakeGuild {
    async fn post_embed(&self, channel_id: Snowflake, embed: &Embed) -> ApiResult<PostedMessage> {
        let posted = PostedMessage::new(channel_id, self.next_message_id());
        self.posted.lock().push((posted, embed.clone()));
        Ok(posted)
    }

    async fn delete_message(&self, _channel_id: Snowflake, message_id: Snowflake) -> ApiResult<()> {
        self.deleted.lock().push(message_id);
        Ok(())
    }

    async fn add_reaction(
        &self,
        _channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> ApiResult<()> {
        self.bot_reactions
            .lock()
            .push((message_id, emoji.to_string()));
        Ok(())
    }

    async fn remove_reaction(
        &self,
        _channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
        user_id: Snowflake,
    ) -> ApiResult<()> {
        self.removed_reactions
            .lock()
            .push((message_id, emoji.to_string(), user_id));
        Ok(())
    }

    async fn list_messages(&self, _channel_id: Snowflake, limit: u32) -> ApiResult<Vec<Snowflake>> {
        Ok(self
            .channel_backlog
            .lock()
            .iter()
            .take(limit as usize)
            .copied()
            .collect())
    }
}

/// SQLite mirror whose writes can be made to fail for chosen members
pub struct FaultyMirror {
    inner: SqliteRoleMirrorRepository,
    failing_users: DashSet<Snowflake>,
}

impl FaultyMirror {
    pub fn new(inner: SqliteRoleMirrorRepository) -> Self {
        Self {
            inner,
            failing_users: DashSet::new(),
        }
    }

    /// Every later write for `user_id` fails as if the database were locked
    pub fn fail_writes_for(&self, user_id: Snowflake) {
        self.failing_users.insert(user_id);
    }

    fn check(&self, user_id: Snowflake) -> RepoResult<()> {
        if self.failing_users.contains(&user_id) {
            return Err(DomainError::DatabaseError("database is locked".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RoleMirrorRepository for FaultyMirror {
    async fn replace_roles(
        &self,
        user_id: Snowflake,
        guild_id: Snowflake,
        roles: &RoleSet,
    ) -> RepoResult<()> {
        self.check(user_id)?;
        self.inner.replace_roles(user_id, guild_id, roles).await
    }

    async fn get_roles(&self, user_id: Snowflake, guild_id: Snowflake) -> RepoResult<RoleSet> {
        self.inner.get_roles(user_id, guild_id).await
    }

    async fn has_joined_before(
        &self,
        user_id: Snowflake,
        guild_id: Snowflake,
    ) -> RepoResult<bool> {
        self.inner.has_joined_before(user_id, guild_id).await
    }

    async fn mark_joined(&self, user_id: Snowflake, guild_id: Snowflake) -> RepoResult<()> {
        self.check(user_id)?;
        self.inner.mark_joined(user_id, guild_id).await
    }

    async fn purge_role(&self, guild_id: Snowflake, role_id: Snowflake) -> RepoResult<u64> {
        self.inner.purge_role(guild_id, role_id).await
    }
}
