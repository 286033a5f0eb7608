//! Service context - dependency container for services
//!
//! Holds the mirror store, the live-guild collaborators and the engine
//! settings. Cloning is cheap; every dependency sits behind an `Arc`.

use std::sync::Arc;
use std::time::Duration;

use rolekeeper_common::AppConfig;
use rolekeeper_core::traits::{
    GuildDirectory, GuildRoleMutator, MessagingSurface, RoleMirrorRepository,
};
use rolekeeper_core::{ReactionRoleDefinition, Snowflake};

use super::error::{ServiceError, ServiceResult};

/// Largest page the member listing accepts
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Settings fixed at process start
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub guild_id: Snowflake,
    /// The bot's own user; its reactions are never toggles
    pub bot_user_id: Snowflake,
    /// Granted on a member's first observed join
    pub default_role_id: Snowflake,
    pub reaction_roles_channel_id: Snowflake,
    pub reaction_roles: Vec<ReactionRoleDefinition>,
    /// Page size of the guild sync listing
    pub sync_page_size: u32,
    /// Minimum spacing between bulk grants
    pub bulk_assign_interval: Duration,
    /// Lifetime of a toggle notice
    pub notice_ttl: Duration,
}

impl EngineSettings {
    /// Settings with the stock pacing (sync page 100, bulk spacing 250 ms,
    /// notices kept 15 s)
    pub fn new(
        guild_id: Snowflake,
        bot_user_id: Snowflake,
        default_role_id: Snowflake,
        reaction_roles_channel_id: Snowflake,
        reaction_roles: Vec<ReactionRoleDefinition>,
    ) -> Self {
        Self {
            guild_id,
            bot_user_id,
            default_role_id,
            reaction_roles_channel_id,
            reaction_roles,
            sync_page_size: 100,
            bulk_assign_interval: Duration::from_millis(250),
            notice_ttl: Duration::from_secs(15),
        }
    }

    /// Sync page size clamped to what the listing accepts
    pub fn effective_page_size(&self) -> u32 {
        self.sync_page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

impl From<&AppConfig> for EngineSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            guild_id: config.bot.guild_id,
            bot_user_id: config.bot.bot_user_id,
            default_role_id: config.bot.member_role_id,
            reaction_roles_channel_id: config.bot.reaction_roles_channel_id,
            reaction_roles: config.bot.reaction_roles.clone(),
            sync_page_size: config.sync.page_size,
            bulk_assign_interval: Duration::from_millis(config.sync.bulk_assign_interval_ms),
            notice_ttl: Duration::from_secs(config.notices.ttl_secs),
        }
    }
}

/// Service context containing all dependencies
///
/// This is the dependency container passed to every service:
/// - the role mirror store
/// - the guild directory (live member listing)
/// - the guild role mutator (live grants and revokes)
/// - the messaging surface (control message, notices)
/// - the engine settings
#[derive(Clone)]
pub struct ServiceContext {
    // Store
    mirror: Arc<dyn RoleMirrorRepository>,

    // Live guild collaborators
    directory: Arc<dyn GuildDirectory>,
    role_mutator: Arc<dyn GuildRoleMutator>,
    messaging: Arc<dyn MessagingSurface>,

    settings: Arc<EngineSettings>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        mirror: Arc<dyn RoleMirrorRepository>,
        directory: Arc<dyn GuildDirectory>,
        role_mutator: Arc<dyn GuildRoleMutator>,
        messaging: Arc<dyn MessagingSurface>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            mirror,
            directory,
            role_mutator,
            messaging,
            settings: Arc::new(settings),
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Store ===

    /// Get the role mirror repository
    pub fn mirror(&self) -> &dyn RoleMirrorRepository {
        self.mirror.as_ref()
    }

    // === Collaborators ===

    /// Get the guild directory
    pub fn directory(&self) -> &dyn GuildDirectory {
        self.directory.as_ref()
    }

    /// Get the guild role mutator
    pub fn role_mutator(&self) -> &dyn GuildRoleMutator {
        self.role_mutator.as_ref()
    }

    /// Get the messaging surface
    pub fn messaging(&self) -> &dyn MessagingSurface {
        self.messaging.as_ref()
    }

    /// Owned handle to the messaging surface, for detached tasks
    pub fn messaging_handle(&self) -> Arc<dyn MessagingSurface> {
        Arc::clone(&self.messaging)
    }

    // === Settings ===

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("mirror", &"RoleMirrorRepository")
            .field("collaborators", &"...")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    mirror: Option<Arc<dyn RoleMirrorRepository>>,
    directory: Option<Arc<dyn GuildDirectory>>,
    role_mutator: Option<Arc<dyn GuildRoleMutator>>,
    messaging: Option<Arc<dyn MessagingSurface>>,
    settings: Option<EngineSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mirror(mut self, repo: Arc<dyn RoleMirrorRepository>) -> Self {
        self.mirror = Some(repo);
        self
    }

    pub fn directory(mut self, directory: Arc<dyn GuildDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn role_mutator(mut self, mutator: Arc<dyn GuildRoleMutator>) -> Self {
        self.role_mutator = Some(mutator);
        self
    }

    pub fn messaging(mut self, messaging: Arc<dyn MessagingSurface>) -> Self {
        self.messaging = Some(messaging);
        self
    }

    pub fn settings(mut self, settings: EngineSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Configuration` if any dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let missing = |what: &str| ServiceError::configuration(format!("{what} is required"));

        Ok(ServiceContext::new(
            self.mirror.ok_or_else(|| missing("mirror"))?,
            self.directory.ok_or_else(|| missing("directory"))?,
            self.role_mutator.ok_or_else(|| missing("role_mutator"))?,
            self.messaging.ok_or_else(|| missing("messaging"))?,
            self.settings.ok_or_else(|| missing("settings"))?,
        ))
    }
}
