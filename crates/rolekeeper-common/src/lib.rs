//! # rolekeeper-common
//!
//! Shared utilities: configuration, error handling and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    parse_reaction_roles, AppConfig, AppSettings, BotConfig, ConfigError, DatabaseSettings,
    DispatchConfig, Environment, NoticeConfig, SyncConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
