//! Ports - the storage and live-guild interfaces the engine depends on

mod collaborators;
mod repositories;

pub use collaborators::{ApiResult, GuildDirectory, GuildRoleMutator, MessagingSurface};
pub use repositories::{RepoResult, RoleMirrorRepository};
