//! Page guards.
//!
//! Dashboard pages are gated on two conditions: a real (non-anonymous)
//! session, then "any of" a permission list. Paths without a guard entry are
//! public.
//!
//! | Path | Required (any of) |
//! |------|-------------------|
//! | `/` | view-dashboard |
//! | `/data-entry` | edit-all-data, edit-own-data |
//! | `/analytics` | view-analytics |
//! | `/rollup` | view-analytics |
//! | `/units` | view-all-units, view-own-unit, view-assigned-units |
//! | `/advanced-analytics` | view-advanced-analytics |
//! | `/user-management` | manage-users |
//! | `/goal-management` | manage-goals |
//! | `/settings` | manage-users |

use crate::{has_any_permission, AuthError, CurrentUser};
use serde::Serialize;
use zion_types::{Permission, Role};

/// Guard entry for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageGuard {
    pub path: &'static str,
    pub required: &'static [Permission],
}

static PAGE_GUARDS: [PageGuard; 9] = [
    PageGuard {
        path: "/",
        required: &[Permission::ViewDashboard],
    },
    PageGuard {
        path: "/data-entry",
        required: &[Permission::EditAllData, Permission::EditOwnData],
    },
    PageGuard {
        path: "/analytics",
        required: &[Permission::ViewAnalytics],
    },
    PageGuard {
        path: "/rollup",
        required: &[Permission::ViewAnalytics],
    },
    PageGuard {
        path: "/units",
        required: &[
            Permission::ViewAllUnits,
            Permission::ViewOwnUnit,
            Permission::ViewAssignedUnits,
        ],
    },
    PageGuard {
        path: "/advanced-analytics",
        required: &[Permission::ViewAdvancedAnalytics],
    },
    PageGuard {
        path: "/user-management",
        required: &[Permission::ManageUsers],
    },
    PageGuard {
        path: "/goal-management",
        required: &[Permission::ManageGoals],
    },
    PageGuard {
        path: "/settings",
        required: &[Permission::ManageUsers],
    },
];

/// All page guards.
#[must_use]
pub fn page_guards() -> &'static [PageGuard] {
    &PAGE_GUARDS
}

/// Returns the guard covering `path`, if any.
///
/// `/units/harare-1st` is covered by `/units`; `/` covers only itself.
#[must_use]
pub fn guard_for(path: &str) -> Option<&'static PageGuard> {
    let path = normalize(path);
    PAGE_GUARDS.iter().find(|guard| {
        guard.path == path
            || (guard.path != "/"
                && path
                    .strip_prefix(guard.path)
                    .is_some_and(|rest| rest.starts_with('/')))
    })
}

fn normalize(path: &str) -> &str {
    let path = path.split(&['?', '#'][..]).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Outcome of a page check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "kebab-case")]
pub enum GuardDecision {
    Granted,
    /// The request has no real session.
    AuthenticationRequired,
    AccessDenied {
        role: Role,
        required: Vec<Permission>,
    },
}

impl GuardDecision {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Converts the decision into a `Result`.
    ///
    /// # Errors
    ///
    /// [`AuthError::AuthenticationRequired`] or [`AuthError::AccessDenied`]
    /// for the matching decisions.
    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            Self::Granted => Ok(()),
            Self::AuthenticationRequired => Err(AuthError::AuthenticationRequired),
            Self::AccessDenied { role, required } => Err(AuthError::AccessDenied { role, required }),
        }
    }
}

/// Decides whether `user` may open `path`.
///
/// # Example
///
/// ```
/// use zion_auth::{check_page, CurrentUser, GuardDecision};
/// use zion_types::Role;
///
/// let clerk = CurrentUser::new("demo-clerk-harare2", "Brother Nyamande", Role::Viewer);
/// assert_eq!(check_page("/units", &clerk), GuardDecision::Granted);
/// assert!(matches!(check_page("/data-entry", &clerk), GuardDecision::AccessDenied { .. }));
/// assert_eq!(
///     check_page("/units", &CurrentUser::anonymous()),
///     GuardDecision::AuthenticationRequired
/// );
/// ```
#[must_use]
pub fn check_page(path: &str, user: &CurrentUser) -> GuardDecision {
    let Some(guard) = guard_for(path) else {
        return GuardDecision::Granted;
    };
    if user.is_anonymous() {
        tracing::debug!(path, "page requires authentication");
        return GuardDecision::AuthenticationRequired;
    }
    if has_any_permission(user.role(), guard.required) {
        tracing::debug!(path, user = %user.id(), role = %user.role(), "page access granted");
        GuardDecision::Granted
    } else {
        tracing::warn!(
            path,
            user = %user.id(),
            role = %user.role(),
            required = ?guard.required,
            "page access denied"
        );
        GuardDecision::AccessDenied {
            role: user.role(),
            required: guard.required.to_vec(),
        }
    }
}
