//! The closed set of dashboard roles.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dashboard role.
///
/// Roles are fixed at compile time. Stored role strings are parsed with
/// [`FromStr`], which rejects anything outside the set instead of coercing
/// it to a default.
///
/// | Variant | Wire value | Scope |
/// |---------|------------|-------|
/// | `StakeLeader` | `stake-leader` | every unit in the stake |
/// | `UnitLeader` | `unit-leader` | one unit |
/// | `Viewer` | `viewer` | read-only, assigned units |
///
/// # Example
///
/// ```
/// use zion_types::Role;
///
/// let role: Role = "unit-leader".parse().unwrap();
/// assert_eq!(role, Role::UnitLeader);
/// assert_eq!(role.as_str(), "unit-leader");
/// assert!("bishop".parse::<Role>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Leader of all units.
    StakeLeader,
    /// Leader of a single unit.
    UnitLeader,
    /// Read-only viewer of assigned units.
    Viewer,
}

impl Role {
    /// Every role, highest privilege first.
    pub const ALL: [Role; 3] = [Role::StakeLeader, Role::UnitLeader, Role::Viewer];

    /// The lowest-privilege role, used for fallback identities.
    #[must_use]
    pub const fn lowest() -> Self {
        Self::Viewer
    }

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StakeLeader => "stake-leader",
            Self::UnitLeader => "unit-leader",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseError::UnknownRole(s.to_string()))
    }
}
