//! Opaque identifiers.
//!
//! Ids are owned by the hosted backend (auth user ids, unit row ids) or by
//! the demo fixtures, so they are kept as strings rather than parsed into a
//! fixed format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel id of the anonymous fallback identity.
pub const ANONYMOUS_USER_ID: &str = "demo-user";

/// Identifier of a signed-in (or fixture) user.
///
/// # Example
///
/// ```
/// use zion_types::UserId;
///
/// let id = UserId::new("demo-stake-leader");
/// assert_eq!(id.as_str(), "demo-stake-leader");
/// assert!(!id.is_anonymous());
/// assert!(UserId::anonymous().is_anonymous());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wraps a raw id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id used by the anonymous fallback identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(ANONYMOUS_USER_ID.to_string())
    }

    /// Returns `true` for the anonymous sentinel.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS_USER_ID
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of an organizational unit (ward or branch).
///
/// Unit records live in the external data store; this crate only carries
/// the reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for UnitId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_sentinel() {
        let id = UserId::anonymous();
        assert_eq!(id.as_str(), "demo-user");
        assert!(id.is_anonymous());
        assert!(!UserId::new("demo-clerk-harare2").is_anonymous());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let unit = UnitId::new("harare-1st");
        assert_eq!(serde_json::to_string(&unit).unwrap(), "\"harare-1st\"");

        let back: UserId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, UserId::from("abc"));
    }

    #[test]
    fn display_is_raw_value() {
        assert_eq!(format!("{}", UnitId::from("norton")), "norton");
        assert_eq!(format!("{}", UserId::from("u-1")), "u-1");
    }
}
