//! Error handling utilities for repositories

use rolekeeper_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Convert a failure while finishing a transaction, keeping the stage in the message
pub fn map_tx_error(stage: &'static str) -> impl FnOnce(SqlxError) -> DomainError {
    move |e| DomainError::DatabaseError(format!("{stage}: {e}"))
}
