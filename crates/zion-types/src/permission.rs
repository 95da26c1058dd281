//! Permission identifiers.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An action or page a role may be granted.
///
/// The set is closed; each variant serializes to a kebab-case wire value
/// (`Permission::ManageUsers` ↔ `"manage-users"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    ViewDashboard,
    ViewAllUnits,
    ViewOwnUnit,
    ViewAssignedUnits,
    EditAllData,
    EditOwnData,
    ViewAnalytics,
    ViewAdvancedAnalytics,
    ExportReports,
    ExportOwnReports,
    ManageUsers,
    ManageGoals,
    ViewAreaPriorities,
    ManageAreaPriorities,
}

impl Permission {
    /// Every permission in declaration order.
    pub const ALL: [Permission; 14] = [
        Permission::ViewDashboard,
        Permission::ViewAllUnits,
        Permission::ViewOwnUnit,
        Permission::ViewAssignedUnits,
        Permission::EditAllData,
        Permission::EditOwnData,
        Permission::ViewAnalytics,
        Permission::ViewAdvancedAnalytics,
        Permission::ExportReports,
        Permission::ExportOwnReports,
        Permission::ManageUsers,
        Permission::ManageGoals,
        Permission::ViewAreaPriorities,
        Permission::ManageAreaPriorities,
    ];

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewDashboard => "view-dashboard",
            Self::ViewAllUnits => "view-all-units",
            Self::ViewOwnUnit => "view-own-unit",
            Self::ViewAssignedUnits => "view-assigned-units",
            Self::EditAllData => "edit-all-data",
            Self::EditOwnData => "edit-own-data",
            Self::ViewAnalytics => "view-analytics",
            Self::ViewAdvancedAnalytics => "view-advanced-analytics",
            Self::ExportReports => "export-reports",
            Self::ExportOwnReports => "export-own-reports",
            Self::ManageUsers => "manage-users",
            Self::ManageGoals => "manage-goals",
            Self::ViewAreaPriorities => "view-area-priorities",
            Self::ManageAreaPriorities => "manage-area-priorities",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseError::UnknownPermission(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn wire_values_round_trip_through_from_str() {
        for p in Permission::ALL {
            assert_eq!(p.as_str().parse::<Permission>(), Ok(p));
        }
    }

    #[test]
    fn wire_values_are_unique() {
        let values: HashSet<_> = Permission::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(values.len(), Permission::ALL.len());
    }

    #[test]
    fn serde_matches_as_str() {
        for p in Permission::ALL {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.as_str()));
        }
    }

    #[test]
    fn unknown_permission() {
        assert_eq!(
            "delete-everything".parse::<Permission>(),
            Err(ParseError::UnknownPermission("delete-everything".into()))
        );
    }
}
