//! Configuration structs

mod app_config;

pub use app_config::{
    parse_reaction_roles, AppConfig, AppSettings, BotConfig, ConfigError, DatabaseSettings,
    DispatchConfig, Environment, NoticeConfig, SyncConfig,
};
