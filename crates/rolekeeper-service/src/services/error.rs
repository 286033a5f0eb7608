//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use rolekeeper_common::AppError;
use rolekeeper_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Store or live-platform failure
    Domain(DomainError),

    /// Unusable configuration; fatal at startup
    Configuration(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Configuration(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Configuration(_) => None,
        }
    }
}

impl ServiceError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether startup has to stop on this error
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Configuration(_) => true,
            Self::Domain(e) => e.is_configuration(),
        }
    }

    /// Failure of the local mirror store
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_store())
    }

    /// Get the error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Configuration(msg) => Self::Configuration(msg),
            other => Self::Domain(other),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            other => AppError::Service(other.to_string()),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
