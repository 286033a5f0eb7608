//! Role engine services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of one
//! operation; construct them per event.

pub mod bulk_assign;
pub mod context;
pub mod error;
pub mod ingest;
pub mod notices;
pub mod pagination;
pub mod reaction_roles;
pub mod sync;

// Re-export all services for convenience
pub use bulk_assign::{BulkAssignReport, BulkRoleAssigner};
pub use context::{EngineSettings, ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use ingest::{EventIngestor, JoinOutcome};
pub use reaction_roles::{ReactionRoleSession, ReactionToggleController, ToggleOutcome};
pub use sync::GuildSyncer;
