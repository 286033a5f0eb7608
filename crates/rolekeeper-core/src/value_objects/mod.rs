//! Value objects - immutable types that represent domain concepts

mod snowflake;

pub use snowflake::{Snowflake, SnowflakeParseError};

/// A member's role set in one guild.
///
/// Ordered so that logs, store writes and test assertions are deterministic.
pub type RoleSet = std::collections::BTreeSet<Snowflake>;
