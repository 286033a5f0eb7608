//! Repository implementations
//!
//! SQLite implementations of the repository traits defined in rolekeeper-core.

mod error;
mod role_mirror;

pub use role_mirror::SqliteRoleMirrorRepository;
