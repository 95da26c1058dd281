//! Permission evaluation.
//!
//! Three decisions over a role's granted set:
//!
//! | Function | Semantics | Empty input |
//! |----------|-----------|-------------|
//! | [`has_permission`] | membership | n/a |
//! | [`has_any_permission`] | at least one (OR) | `false` |
//! | [`has_all_permissions`] | every one (AND) | `true` |
//!
//! The free functions are pure. [`PermissionPolicy`] puts the same decisions
//! behind a trait so callers can substitute a policy in tests;
//! [`RolePolicy`] is the registry-backed implementation and emits an audit
//! event for every composite check.

use crate::{role_config, AuthError};
use zion_types::{Permission, Role};

/// Returns `true` if `role` is granted `permission`.
#[must_use]
pub fn has_permission(role: Role, permission: Permission) -> bool {
    role_config(role).grants(permission)
}

/// Returns `true` if `role` holds at least one of `permissions`.
///
/// An empty list yields `false`. Pages that need no permission must not be
/// modelled with an empty list; they simply have no guard.
///
/// # Example
///
/// ```
/// use zion_auth::has_any_permission;
/// use zion_types::{Permission, Role};
///
/// let edit = [Permission::EditAllData, Permission::EditOwnData];
/// assert!(has_any_permission(Role::UnitLeader, &edit));
/// assert!(!has_any_permission(Role::Viewer, &edit));
/// assert!(!has_any_permission(Role::StakeLeader, &[]));
/// ```
#[must_use]
pub fn has_any_permission(role: Role, permissions: &[Permission]) -> bool {
    permissions.iter().any(|p| has_permission(role, *p))
}

/// Returns `true` if `role` holds every one of `permissions`.
///
/// An empty list is vacuously satisfied.
#[must_use]
pub fn has_all_permissions(role: Role, permissions: &[Permission]) -> bool {
    permissions.iter().all(|p| has_permission(role, *p))
}

/// Abstract permission policy.
///
/// Only [`has_permission`](Self::has_permission) is required; the composite
/// checks are derived from it.
///
/// # Example
///
/// ```
/// use zion_auth::PermissionPolicy;
/// use zion_types::{Permission, Role};
///
/// /// Grants nothing. Useful for maintenance windows.
/// struct LockedPolicy;
///
/// impl PermissionPolicy for LockedPolicy {
///     fn has_permission(&self, _role: Role, _permission: Permission) -> bool {
///         false
///     }
/// }
///
/// let policy = LockedPolicy;
/// assert!(!policy.has_any_permission(Role::StakeLeader, &[Permission::ViewDashboard]));
/// assert!(policy.has_all_permissions(Role::StakeLeader, &[]));
/// ```
pub trait PermissionPolicy: Send + Sync {
    /// Membership check for a single permission.
    fn has_permission(&self, role: Role, permission: Permission) -> bool;

    /// OR semantics. Empty list → `false`.
    fn has_any_permission(&self, role: Role, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(role, *p))
    }

    /// AND semantics. Empty list → `true`.
    fn has_all_permissions(&self, role: Role, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has_permission(role, *p))
    }

    /// Like [`has_any_permission`](Self::has_any_permission) but returns a
    /// typed denial.
    ///
    /// # Errors
    ///
    /// [`AuthError::AccessDenied`] when none of `permissions` is held.
    fn require_any(&self, role: Role, permissions: &[Permission]) -> Result<(), AuthError> {
        if self.has_any_permission(role, permissions) {
            Ok(())
        } else {
            Err(AuthError::AccessDenied {
                role,
                required: permissions.to_vec(),
            })
        }
    }
}

/// Registry-backed policy.
///
/// # Audit Logging
///
/// - allowed composite checks: debug level
/// - denied composite checks: warn level
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl PermissionPolicy for RolePolicy {
    fn has_permission(&self, role: Role, permission: Permission) -> bool {
        has_permission(role, permission)
    }

    fn has_any_permission(&self, role: Role, permissions: &[Permission]) -> bool {
        let allowed = has_any_permission(role, permissions);
        audit(role, permissions, "any", allowed);
        allowed
    }

    fn has_all_permissions(&self, role: Role, permissions: &[Permission]) -> bool {
        let allowed = has_all_permissions(role, permissions);
        audit(role, permissions, "all", allowed);
        allowed
    }
}

fn audit(role: Role, permissions: &[Permission], mode: &'static str, allowed: bool) {
    if allowed {
        tracing::debug!(role = %role, mode, required = ?permissions, "permission check allowed");
    } else {
        tracing::warn!(role = %role, mode, required = ?permissions, "permission check denied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_permission_follows_registry() {
        for role in Role::ALL {
            for p in Permission::ALL {
                assert_eq!(has_permission(role, p), role_config(role).grants(p));
            }
        }
    }

    #[test]
    fn any_of_empty_is_false() {
        for role in Role::ALL {
            assert!(!has_any_permission(role, &[]), "{role}");
            assert!(!RolePolicy.has_any_permission(role, &[]), "{role}");
        }
    }

    #[test]
    fn all_of_empty_is_true() {
        for role in Role::ALL {
            assert!(has_all_permissions(role, &[]), "{role}");
            assert!(RolePolicy.has_all_permissions(role, &[]), "{role}");
        }
    }

    #[test]
    fn any_of_is_or() {
        let units = [
            Permission::ViewAllUnits,
            Permission::ViewOwnUnit,
            Permission::ViewAssignedUnits,
        ];
        for role in Role::ALL {
            assert!(has_any_permission(role, &units), "{role}");
        }
        assert!(!has_all_permissions(Role::StakeLeader, &units));
    }

    #[test]
    fn all_of_is_and() {
        let manage = [Permission::ManageUsers, Permission::ManageGoals];
        assert!(has_all_permissions(Role::StakeLeader, &manage));
        assert!(!has_all_permissions(Role::UnitLeader, &manage));

        let mixed = [Permission::ViewDashboard, Permission::ManageUsers];
        assert!(has_any_permission(Role::Viewer, &mixed));
        assert!(!has_all_permissions(Role::Viewer, &mixed));
    }

    #[test]
    fn require_any_returns_typed_denial() {
        assert!(RolePolicy
            .require_any(Role::StakeLeader, &[Permission::ManageUsers])
            .is_ok());

        let err = RolePolicy
            .require_any(Role::Viewer, &[Permission::ManageUsers])
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::AccessDenied {
                role: Role::Viewer,
                required: vec![Permission::ManageUsers],
            }
        );
    }

    #[test]
    fn custom_policy_uses_derived_checks() {
        struct OnlyDashboard;
        impl PermissionPolicy for OnlyDashboard {
            fn has_permission(&self, _role: Role, permission: Permission) -> bool {
                permission == Permission::ViewDashboard
            }
        }

        let policy = OnlyDashboard;
        assert!(policy.has_any_permission(
            Role::Viewer,
            &[Permission::ManageUsers, Permission::ViewDashboard]
        ));
        assert!(!policy.has_all_permissions(
            Role::StakeLeader,
            &[Permission::ManageUsers, Permission::ViewDashboard]
        ));
    }
}
