//! # rolekeeper-core
//!
//! Domain layer for the role mirror: identifiers, entities, guild events, the
//! reconciliation policy, and the traits (ports) for storage and for the live
//! guild collaborators. No dependency on any database, network or runtime.

pub mod entities;
pub mod error;
pub mod events;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Embed, GuildMember, PostedMessage, ReactionRoleDefinition};
pub use error::DomainError;
pub use events::{
    GuildEvent, GuildRoleDeletedEvent, MemberJoinedEvent, MemberKey, MemberRolesUpdatedEvent,
    ReactionAddedEvent,
};
pub use policy::{JoinDecision, MirrorWriteDecision, PurgeDecision, ReconciliationPolicy};
pub use traits::{
    ApiResult, GuildDirectory, GuildRoleMutator, MessagingSurface, RepoResult,
    RoleMirrorRepository,
};
pub use value_objects::{RoleSet, Snowflake, SnowflakeParseError};
