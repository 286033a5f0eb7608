//! Domain errors - error types shared by the store and the live collaborators

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Store Errors
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    // =========================================================================
    // External API Errors
    // =========================================================================
    #[error("Rate limited by the platform (retry after {retry_after_ms} ms)")]
    RateLimited { retry_after_ms: u64 },

    #[error("Missing permission: {0}")]
    MissingPermission(String),

    #[error("Unknown member: {0}")]
    UnknownMember(Snowflake),

    #[error("Unknown message: {0}")]
    UnknownMessage(Snowflake),

    #[error("Unknown role: {0}")]
    UnknownRole(Snowflake),

    #[error("External service error: {0}")]
    ExternalService(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DomainError {
    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::UnknownMember(_) => "UNKNOWN_MEMBER",
            Self::UnknownMessage(_) => "UNKNOWN_MESSAGE",
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Failure of the local mirror store
    pub fn is_store(&self) -> bool {
        matches!(self, Self::DatabaseError(_))
    }

    /// Failure reported by (or while talking to) the live platform
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. }
                | Self::MissingPermission(_)
                | Self::UnknownMember(_)
                | Self::UnknownMessage(_)
                | Self::UnknownRole(_)
                | Self::ExternalService(_)
        )
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
