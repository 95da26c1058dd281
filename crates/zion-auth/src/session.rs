//! The resolved user for a single request.

use serde::{Deserialize, Serialize};
use zion_types::{Role, UnitId, UserId};

/// Display name of the anonymous fallback identity.
pub const ANONYMOUS_NAME: &str = "Demo User";

/// Display name used when a stored profile has none.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// The user a request is served for.
///
/// Built fresh by the session resolver on every request and never mutated
/// afterwards; the `with_*` builders consume and return a new value.
///
/// # Example
///
/// ```
/// use zion_auth::CurrentUser;
/// use zion_types::{Role, UnitId};
///
/// let user = CurrentUser::new("demo-bishop-harare1", "Bishop Chigumira", Role::UnitLeader)
///     .with_email("bishop.harare1@harare.zw")
///     .with_units([UnitId::new("harare-1st")]);
///
/// assert_eq!(user.role(), Role::UnitLeader);
/// assert_eq!(user.units().len(), 1);
/// assert!(!user.is_anonymous());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    id: UserId,
    name: String,
    email: Option<String>,
    role: Role,
    units: Vec<UnitId>,
}

impl CurrentUser {
    #[must_use]
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            role,
            units: Vec::new(),
        }
    }

    /// The identity used when no real session can be established.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(UserId::anonymous(), ANONYMOUS_NAME, Role::lowest())
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_units(mut self, units: impl IntoIterator<Item = UnitId>) -> Self {
        self.units = units.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Units this user is assigned to.
    #[must_use]
    pub fn units(&self) -> &[UnitId] {
        &self.units
    }

    /// Returns `true` for the anonymous fallback identity.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.id.is_anonymous()
    }
}

/// How a [`CurrentUser`] was obtained.
///
/// ```text
/// Unresolved ──► DemoResolved
///     │     ──► StoreResolved
///     └────────► FallbackAnonymous
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionState {
    Unresolved,
    /// A known demo marker was present.
    DemoResolved,
    /// Built from the auth session and the data store.
    StoreResolved,
    /// Collaborators absent, failed, or had no data.
    FallbackAnonymous,
}

impl ResolutionState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unresolved => "unresolved",
            Self::DemoResolved => "demo-resolved",
            Self::StoreResolved => "store-resolved",
            Self::FallbackAnonymous => "fallback-anonymous",
        }
    }
}

impl std::fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one resolver pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSession {
    pub user: CurrentUser,
    pub state: ResolutionState,
}

impl ResolvedSession {
    #[must_use]
    pub fn new(user: CurrentUser, state: ResolutionState) -> Self {
        Self { user, state }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(CurrentUser::anonymous(), ResolutionState::FallbackAnonymous)
    }

    #[must_use]
    pub fn into_user(self) -> CurrentUser {
        self.user
    }
}
