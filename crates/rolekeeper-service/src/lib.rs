//! # rolekeeper-service
//!
//! Application layer: the event ingestor, the guild syncer, the reaction role
//! toggle controller and bulk role assignment, all driven through the ports
//! defined in `rolekeeper-core`.

pub mod services;


pub use services::{
    BulkAssignReport, BulkRoleAssigner, EngineSettings, EventIngestor, GuildSyncer, JoinOutcome,
    ReactionRoleSession, ReactionToggleController, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, ToggleOutcome,
};
