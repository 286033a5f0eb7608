//! Integration test utilities for the role engine
//!
//! Runs the full engine against the SQLite mirror and an in-memory stand-in
//! for the live guild.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
