//! # rolekeeper-db
//!
//! Database layer implementing the role mirror store with SQLite via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Idempotent schema bootstrap
//! - Row models with SQLx `FromRow` derives and row-to-domain mappers
//! - [`SqliteRoleMirrorRepository`], the [`RoleMirrorRepository`] implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rolekeeper_db::{create_pool, run_migrations, DatabaseConfig, SqliteRoleMirrorRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let mirror = SqliteRoleMirrorRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```
//!
//! [`RoleMirrorRepository`]: rolekeeper_core::traits::RoleMirrorRepository

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_memory_pool, create_pool, DatabaseConfig, SqlitePool};
pub use repositories::SqliteRoleMirrorRepository;
pub use schema::run_migrations;
