//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). Everything is fixed at process start; nothing is re-read later.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use rolekeeper_core::{ReactionRoleDefinition, Snowflake};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub bot: BotConfig,
    pub sync: SyncConfig,
    pub notices: NoticeConfig,
    pub dispatch: DispatchConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Role mirror database settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Identity of the bot and the guild it manages
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub guild_id: Snowflake,
    /// The bot's own user; its reactions are never toggles
    pub bot_user_id: Snowflake,
    /// Role granted on a member's first observed join
    pub member_role_id: Snowflake,
    pub reaction_roles_channel_id: Snowflake,
    /// Ordered list shown on the control message
    pub reaction_roles: Vec<ReactionRoleDefinition>,
}

/// Guild sync and bulk assignment pacing
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_sync_page_size")]
    pub page_size: u32,
    #[serde(default = "default_bulk_assign_interval_ms")]
    pub bulk_assign_interval_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: default_sync_page_size(),
            bulk_assign_interval_ms: default_bulk_assign_interval_ms(),
        }
    }
}

/// Toggle notice settings
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NoticeConfig {
    #[serde(default = "default_notice_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_notice_ttl_secs(),
        }
    }
}

/// Event dispatcher settings
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DispatchConfig {
    #[serde(default = "default_dispatch_shards")]
    pub shards: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            shards: default_dispatch_shards(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "rolekeeper".to_string()
}

fn default_database_url() -> String {
    "sqlite://sticky_roles.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_sync_page_size() -> u32 {
    100
}

fn default_bulk_assign_interval_ms() -> u64 {
    250
}

fn default_notice_ttl_secs() -> u64 {
    15
}

fn default_dispatch_shards() -> usize {
    8
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value is malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if a required key is missing or a value is malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let reaction_roles_raw = vars.required_raw("REACTION_ROLES")?;

        Ok(Self {
            app: AppSettings {
                name: vars.raw("APP_NAME").unwrap_or_else(default_app_name),
                env: match vars.raw("APP_ENV") {
                    Some(s) => Environment::parse(&s)
                        .ok_or(ConfigError::InvalidValue("APP_ENV", s))?,
                    None => Environment::default(),
                },
            },
            database: DatabaseSettings {
                url: vars.raw("DATABASE_URL").unwrap_or_else(default_database_url),
                max_connections: vars
                    .optional("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
            },
            bot: BotConfig {
                guild_id: vars.required("GUILD_ID")?,
                bot_user_id: vars.required("BOT_USER_ID")?,
                member_role_id: vars.required("MEMBER_ROLE_ID")?,
                reaction_roles_channel_id: vars.required("REACTION_ROLES_CHANNEL_ID")?,
                reaction_roles: parse_reaction_roles(&reaction_roles_raw)?,
            },
            sync: SyncConfig {
                page_size: vars
                    .optional("SYNC_PAGE_SIZE")?
                    .unwrap_or_else(default_sync_page_size),
                bulk_assign_interval_ms: vars
                    .optional("BULK_ASSIGN_INTERVAL_MS")?
                    .unwrap_or_else(default_bulk_assign_interval_ms),
            },
            notices: NoticeConfig {
                ttl_secs: vars
                    .optional("NOTICE_TTL_SECS")?
                    .unwrap_or_else(default_notice_ttl_secs),
            },
            dispatch: DispatchConfig {
                shards: vars
                    .optional("DISPATCH_SHARDS")?
                    .unwrap_or_else(default_dispatch_shards),
            },
        })
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required_raw(&self, key: &'static str) -> Result<String, ConfigError> {
        self.raw(key).ok_or(ConfigError::MissingVar(key))
    }

    fn required<T: FromStr>(&self, key: &'static str) -> Result<T, ConfigError> {
        let value = self.required_raw(key)?;
        value
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, value))
    }

    fn optional<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        self.raw(key)
            .map(|value| {
                value
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(key, value))
            })
            .transpose()
    }
}

/// Parse a `|`-delimited list of reaction roles.
///
/// Format: `ROLEID,NAME,EMOJI|ROLEID,NAME,EMOJI|...`. Blank segments are
/// skipped; whitespace around every field is trimmed.
///
/// # Errors
/// Returns an error for empty input, entries without exactly three fields,
/// empty fields, or role IDs that are not numeric.
pub fn parse_reaction_roles(raw: &str) -> Result<Vec<ReactionRoleDefinition>, ConfigError> {
    if raw.trim().is_empty() {
        return Err(ConfigError::InvalidReactionRoles(
            "input string is empty".to_string(),
        ));
    }

    let mut roles = Vec::new();
    for entry in raw.split('|').map(str::trim).filter(|e| !e.is_empty()) {
        let fields: Vec<&str> = entry.split(',').map(str::trim).collect();
        let [id, name, emoji] = fields.as_slice() else {
            return Err(ConfigError::InvalidReactionRoles(format!(
                "expected ROLEID,NAME,EMOJI, got {entry:?}"
            )));
        };

        if id.is_empty() || name.is_empty() || emoji.is_empty() {
            return Err(ConfigError::InvalidReactionRoles(format!(
                "one or more fields are empty in {entry:?}"
            )));
        }

        let role_id = Snowflake::parse(id).map_err(|_| {
            ConfigError::InvalidReactionRoles(format!("role ID {id:?} is not numeric"))
        })?;

        roles.push(ReactionRoleDefinition::new(role_id, *name, *emoji));
    }

    Ok(roles)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Invalid reaction roles: {0}")]
    InvalidReactionRoles(String),
}
