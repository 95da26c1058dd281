//! Role registry.
//!
//! Static table mapping each [`Role`] to its [`RoleConfig`]. The table is
//! compiled in and read-only; lookups by [`Role`] are total, lookups by raw
//! string go through [`RoleConfig::lookup`] and may fail.
//!
//! | Role | Sidebar default | Permissions |
//! |------|-----------------|-------------|
//! | Stake Leader | open | everything except the own-unit and assigned-unit scopes |
//! | Unit Leader | open | own unit: view, edit, export; analytics; area priorities |
//! | Viewer | closed | dashboard, assigned units, area priorities |

use crate::AuthError;
use serde::Serialize;
use std::collections::BTreeSet;
use zion_types::{Permission, Role};

/// Display color tag attached to a role (badges, role switcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleColor {
    Purple,
    Blue,
    Green,
}

impl RoleColor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }
}

/// Static configuration of a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleConfig {
    pub role: Role,
    pub label: &'static str,
    pub description: &'static str,
    /// Initial sidebar state when the user has no explicit preference.
    pub default_sidebar_open: bool,
    /// Granted permissions, in display order.
    pub permissions: &'static [Permission],
    pub color: RoleColor,
}

static ROLE_CONFIGS: [RoleConfig; 3] = [
    RoleConfig {
        role: Role::StakeLeader,
        label: "Stake Leader",
        description: "Full access to all units in the stake",
        default_sidebar_open: true,
        permissions: &[
            Permission::ViewDashboard,
            Permission::ViewAllUnits,
            Permission::EditAllData,
            Permission::ViewAnalytics,
            Permission::ViewAdvancedAnalytics,
            Permission::ExportReports,
            Permission::ManageUsers,
            Permission::ManageGoals,
            Permission::ViewAreaPriorities,
            Permission::ManageAreaPriorities,
        ],
        color: RoleColor::Purple,
    },
    RoleConfig {
        role: Role::UnitLeader,
        label: "Unit Leader",
        description: "Access to specific unit data and entry",
        default_sidebar_open: true,
        permissions: &[
            Permission::ViewDashboard,
            Permission::ViewOwnUnit,
            Permission::EditOwnData,
            Permission::ViewAnalytics,
            Permission::ExportOwnReports,
            Permission::ViewAreaPriorities,
        ],
        color: RoleColor::Blue,
    },
    RoleConfig {
        role: Role::Viewer,
        label: "Viewer",
        description: "Read-only access to assigned units",
        default_sidebar_open: false,
        permissions: &[
            Permission::ViewDashboard,
            Permission::ViewAssignedUnits,
            Permission::ViewAreaPriorities,
        ],
        color: RoleColor::Green,
    },
];

/// Returns the configuration for `role`.
///
/// # Example
///
/// ```
/// use zion_auth::role_config;
/// use zion_types::{Permission, Role};
///
/// let config = role_config(Role::Viewer);
/// assert_eq!(config.label, "Viewer");
/// assert!(!config.default_sidebar_open);
/// assert!(config.grants(Permission::ViewDashboard));
/// ```
#[must_use]
pub fn role_config(role: Role) -> &'static RoleConfig {
    match role {
        Role::StakeLeader => &ROLE_CONFIGS[0],
        Role::UnitLeader => &ROLE_CONFIGS[1],
        Role::Viewer => &ROLE_CONFIGS[2],
    }
}

/// All role configurations, highest privilege first.
#[must_use]
pub fn role_configs() -> &'static [RoleConfig] {
    &ROLE_CONFIGS
}

impl RoleConfig {
    /// Looks up a configuration by raw role string.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidRole`] if `raw` is not a known role.
    pub fn lookup(raw: &str) -> Result<&'static RoleConfig, AuthError> {
        let role: Role = raw.parse()?;
        Ok(role_config(role))
    }

    /// Returns `true` if this role is granted `permission`.
    #[must_use]
    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// Returns the permissions in `referenced` that no role grants.
///
/// A guard or navigation entry gated only on such a permission can never be
/// reached. The result is sorted and deduplicated.
#[must_use]
pub fn unreachable_permissions(referenced: impl IntoIterator<Item = Permission>) -> Vec<Permission> {
    referenced
        .into_iter()
        .filter(|p| !ROLE_CONFIGS.iter().any(|c| c.grants(*p)))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
