//! Authorization errors.
//!
//! Collaborator failures never appear here: the session resolver absorbs
//! them (see [`crate::resolver`]). What remains are data-integrity problems
//! and explicit access denials.

use thiserror::Error;
use zion_types::{ErrorCode, ParseError, Permission, Role};

/// Error raised by the registry, evaluator and guards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A role string outside the closed set reached the registry.
    ///
    /// Indicates corrupted upstream data (a stored role that is not one of
    /// the enumerated values). It is rejected, never coerced.
    #[error("invalid role '{value}': not a configured role")]
    InvalidRole { value: String },

    /// A permission string outside the closed set.
    #[error("invalid permission '{value}'")]
    InvalidPermission { value: String },

    /// The page needs a real session and the request has none.
    #[error("authentication required")]
    AuthenticationRequired,

    /// The role holds none of the required permissions.
    #[error("access denied: role '{role}' lacks any of [{}]", join(required))]
    AccessDenied {
        role: Role,
        required: Vec<Permission>,
    },
}

fn join(perms: &[Permission]) -> String {
    perms
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ParseError> for AuthError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnknownRole(value) => Self::InvalidRole { value },
            ParseError::UnknownPermission(value) => Self::InvalidPermission { value },
        }
    }
}

impl ErrorCode for AuthError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidRole { .. } => "AUTH_INVALID_ROLE",
            Self::InvalidPermission { .. } => "AUTH_INVALID_PERMISSION",
            Self::AuthenticationRequired => "AUTH_AUTHENTICATION_REQUIRED",
            Self::AccessDenied { .. } => "AUTH_ACCESS_DENIED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
