//! Dashboard error types.

use crate::backend::BackendError;
use crate::store::StorageError;
use thiserror::Error;
use zion_types::{ErrorCode, UnitId, UserId};

/// Errors raised by [`Dashboard`](super::Dashboard) operations.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// The requested unit is outside the user's allowed set.
    #[error("unit '{unit}' is not available to '{user}'")]
    UnitNotAllowed { unit: UnitId, user: UserId },
}

impl ErrorCode for DashboardError {
    fn code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.code(),
            Self::Backend(e) => e.code(),
            Self::UnitNotAllowed { .. } => "DASHBOARD_UNIT_NOT_ALLOWED",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_recoverable(),
            Self::Backend(e) => e.is_recoverable(),
            Self::UnitNotAllowed { .. } => true,
        }
    }
}

/// Errors raised by [`Dashboard::sign_in`](super::Dashboard::sign_in).
#[derive(Debug, Error)]
pub enum SignInError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Not a demo login and no backend is configured.
    #[error("Authentication service is not available")]
    AuthenticationUnavailable,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ErrorCode for SignInError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "SIGN_IN_INVALID_CREDENTIALS",
            Self::AuthenticationUnavailable => "SIGN_IN_AUTHENTICATION_UNAVAILABLE",
            Self::Storage(e) => e.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidCredentials => true,
            Self::AuthenticationUnavailable => false,
            Self::Storage(e) => e.is_recoverable(),
        }
    }
}
