//! Error codes shared by every Zion Track crate.
//!
//! Each error enum in the workspace implements [`ErrorCode`] so that callers
//! (the CLI, page renderers, log pipelines) can branch on a stable code
//! instead of parsing display strings.
//!
//! Codes are `UPPER_SNAKE_CASE` and carry a crate prefix:
//!
//! | Crate | Prefix |
//! |-------|--------|
//! | `zion-types` | `TYPES_` |
//! | `zion-auth` | `AUTH_` |
//! | `zion-runtime` | `CONFIG_`, `STORAGE_`, `BACKEND_`, `DASHBOARD_`, `SIGN_IN_` |

use thiserror::Error;

/// Machine-readable error classification.
///
/// # Example
///
/// ```
/// use zion_types::ErrorCode;
///
/// enum LookupError {
///     Missing,
///     Offline,
/// }
///
/// impl ErrorCode for LookupError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::Missing => "LOOKUP_MISSING",
///             Self::Offline => "LOOKUP_OFFLINE",
///         }
///     }
///
///     fn is_recoverable(&self) -> bool {
///         matches!(self, Self::Offline)
///     }
/// }
///
/// assert_eq!(LookupError::Offline.code(), "LOOKUP_OFFLINE");
/// assert!(!LookupError::Missing.is_recoverable());
/// ```
pub trait ErrorCode {
    /// Stable `UPPER_SNAKE_CASE` code, prefixed by the owning crate.
    fn code(&self) -> &'static str;

    /// Whether retrying or user action can clear the error.
    ///
    /// Data-integrity failures (an unknown role stored in the profile table)
    /// are never recoverable.
    fn is_recoverable(&self) -> bool;
}

/// Failure to parse a wire string into one of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The value is not one of the known roles.
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    /// The value is not one of the known permissions.
    #[error("unknown permission '{0}'")]
    UnknownPermission(String),
}

impl ErrorCode for ParseError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownRole(_) => "TYPES_UNKNOWN_ROLE",
            Self::UnknownPermission(_) => "TYPES_UNKNOWN_PERMISSION",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Asserts that `err` follows the workspace code conventions.
///
/// Intended for tests of downstream error enums.
///
/// # Panics
///
/// Panics if the code is empty, lacks `prefix`, or is not
/// `UPPER_SNAKE_CASE`.
pub fn assert_error_code<E: ErrorCode>(err: &E, prefix: &str) {
    let code = err.code();
    assert!(
        code.starts_with(prefix),
        "error code '{code}' must start with '{prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

fn is_upper_snake_case(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('_')
        && !s.ends_with('_')
        && !s.contains("__")
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
