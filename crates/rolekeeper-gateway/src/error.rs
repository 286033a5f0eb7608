//! Gateway error types

use rolekeeper_common::AppError;
use rolekeeper_service::ServiceError;
use thiserror::Error;

use crate::events::DecodeError;

/// Gateway error type
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Payload could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Startup or on-demand operation failed
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Dispatcher is shut down and accepts no more events
    #[error("Event dispatcher is closed")]
    DispatcherClosed,
}

impl GatewayError {
    /// Get the error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "DECODE_ERROR",
            Self::Service(e) => e.error_code(),
            Self::DispatcherClosed => "DISPATCHER_CLOSED",
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Service(e) => e.into(),
            other => AppError::service(other),
        }
    }
}
