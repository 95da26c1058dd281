//! Sidebar state derivation.
//!
//! The initial sidebar state is the role's default unless the user has
//! persisted an explicit choice:
//!
//! ```text
//! preference set?  ── yes ──► preference
//!       │
//!       no
//!       ▼
//! role_config(role).default_sidebar_open
//! ```

use crate::role_config;
use serde::{Deserialize, Serialize};
use zion_types::Role;

/// Optional persisted sidebar choice. Unset means "use the role default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SidebarPreference(Option<bool>);

impl SidebarPreference {
    #[must_use]
    pub const fn unset() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn explicit(open: bool) -> Self {
        Self(Some(open))
    }

    #[must_use]
    pub const fn value(self) -> Option<bool> {
        self.0
    }

    #[must_use]
    pub const fn is_set(self) -> bool {
        self.0.is_some()
    }

    /// Parses the raw persisted form.
    ///
    /// Absent or empty means unset, `"true"` means open, anything else means
    /// closed.
    ///
    /// ```
    /// use zion_auth::SidebarPreference;
    ///
    /// assert_eq!(SidebarPreference::from_raw(None), SidebarPreference::unset());
    /// assert_eq!(SidebarPreference::from_raw(Some("")), SidebarPreference::unset());
    /// assert_eq!(SidebarPreference::from_raw(Some("true")).value(), Some(true));
    /// assert_eq!(SidebarPreference::from_raw(Some("no")).value(), Some(false));
    /// ```
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::unset(),
            Some(value) => Self::explicit(value == "true"),
        }
    }
}

impl From<Option<bool>> for SidebarPreference {
    fn from(value: Option<bool>) -> Self {
        Self(value)
    }
}

/// Returns whether the sidebar starts open for `role`.
#[must_use]
pub fn resolve_sidebar_open(role: Role, preference: SidebarPreference) -> bool {
    preference
        .value()
        .unwrap_or(role_config(role).default_sidebar_open)
}

/// Storage for the persisted sidebar preference.
pub trait PreferenceStore {
    fn sidebar_preference(&self) -> SidebarPreference;

    fn set_sidebar_preference(&mut self, open: bool);

    fn clear_sidebar_preference(&mut self);

    /// Resolves the sidebar state for `role` against this store.
    fn resolve_sidebar_open(&self, role: Role) -> bool {
        resolve_sidebar_open(role, self.sidebar_preference())
    }
}

/// Clears the persisted preference so the role default applies again.
///
/// Returns the resulting sidebar state. Calling it twice has the same effect
/// as calling it once.
pub fn reset_to_role_default<S: PreferenceStore + ?Sized>(store: &mut S, role: Role) -> bool {
    store.clear_sidebar_preference();
    tracing::debug!(role = %role, "sidebar preference reset to role default");
    store.resolve_sidebar_open(role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Cookie(SidebarPreference);

    impl PreferenceStore for Cookie {
        fn sidebar_preference(&self) -> SidebarPreference {
            self.0
        }
        fn set_sidebar_preference(&mut self, open: bool) {
            self.0 = SidebarPreference::explicit(open);
        }
        fn clear_sidebar_preference(&mut self) {
            self.0 = SidebarPreference::unset();
        }
    }

    #[test]
    fn role_defaults_apply_when_unset() {
        assert!(resolve_sidebar_open(Role::StakeLeader, SidebarPreference::unset()));
        assert!(resolve_sidebar_open(Role::UnitLeader, SidebarPreference::unset()));
        assert!(!resolve_sidebar_open(Role::Viewer, SidebarPreference::unset()));
    }

    #[test]
    fn explicit_preference_wins() {
        for role in Role::ALL {
            assert!(resolve_sidebar_open(role, SidebarPreference::explicit(true)));
            assert!(!resolve_sidebar_open(role, SidebarPreference::explicit(false)));
        }
    }

    #[test]
    fn reset_is_idempotent() {
        let mut store = Cookie::default();
        store.set_sidebar_preference(true);
        assert!(store.resolve_sidebar_open(Role::Viewer));

        assert!(!reset_to_role_default(&mut store, Role::Viewer));
        assert!(!store.sidebar_preference().is_set());
        assert!(!reset_to_role_default(&mut store, Role::Viewer));
        assert!(!store.sidebar_preference().is_set());
    }

    #[test]
    fn serializes_as_optional_bool() {
        assert_eq!(
            serde_json::to_string(&SidebarPreference::explicit(false)).unwrap(),
            "false"
        );
        assert_eq!(serde_json::to_string(&SidebarPreference::unset()).unwrap(), "null");
        let back: SidebarPreference = serde_json::from_str("true").unwrap();
        assert_eq!(back, SidebarPreference::explicit(true));
    }
}
