//! Session resolution.
//!
//! Determines the [`CurrentUser`] for one request in a single pass:
//!
//! ```text
//! demo marker known? ── yes ──► DemoResolved (no collaborator calls)
//!        │ no
//!        ▼
//! auth.session_identity() ── unavailable / error / none ──► FallbackAnonymous
//!        │ identity
//!        ▼
//! store.profile(id) ── unavailable / error / none / bad role ──► FallbackAnonymous
//!        │ profile
//!        ▼
//! store.unit_assignments(id) ── error ──► FallbackAnonymous
//!        │ units
//!        ▼
//! StoreResolved
//! ```
//!
//! Resolution never fails: every collaborator problem degrades to
//! [`CurrentUser::anonymous`] and is logged. There are no retries and no
//! caching; each call reflects the collaborators' state at that moment.

use crate::collaborator::{
    AuthProvider, Backend, LookupError, Profile, ProfileDirectory, UnitAssignment, Unconfigured,
};
use crate::session::DEFAULT_DISPLAY_NAME;
use crate::{AuthError, CurrentUser, DemoDirectory, ResolutionState, ResolvedSession, RoleConfig};
use zion_types::{Role, UnitId};

/// Why a resolution fell back to the anonymous identity.
#[derive(Debug)]
enum FallbackReason {
    AuthUnavailable,
    AuthFailed(LookupError),
    SignedOut,
    StoreUnavailable,
    ProfileFailed(LookupError),
    ProfileMissing,
    InvalidRole(AuthError),
    AssignmentsFailed(LookupError),
}

impl FallbackReason {
    fn log(&self) {
        match self {
            Self::AuthUnavailable => {
                tracing::debug!("auth provider not configured, using anonymous identity");
            }
            Self::SignedOut => tracing::debug!("no active session, using anonymous identity"),
            Self::StoreUnavailable => {
                tracing::warn!("authenticated but data store not configured, using anonymous identity");
            }
            Self::ProfileMissing => {
                tracing::warn!("authenticated user has no profile, using anonymous identity");
            }
            Self::AuthFailed(err) | Self::ProfileFailed(err) | Self::AssignmentsFailed(err) => {
                tracing::warn!(error = %err, "collaborator lookup failed, using anonymous identity");
            }
            Self::InvalidRole(err) => {
                tracing::warn!(error = %err, "stored role rejected, using anonymous identity");
            }
        }
    }
}

/// Resolves the current user from demo marker, auth session and data store.
///
/// # Example
///
/// ```
/// use zion_auth::{DemoDirectory, ResolutionState, SessionResolver};
/// use zion_types::Role;
///
/// # block_on(async {
/// let resolver = SessionResolver::demo_only(DemoDirectory::builtin());
///
/// let session = resolver.resolve(Some("viewer-harare2")).await;
/// assert_eq!(session.state, ResolutionState::DemoResolved);
/// assert_eq!(session.user.role(), Role::Viewer);
///
/// let session = resolver.resolve(None).await;
/// assert!(session.user.is_anonymous());
/// # });
/// # fn block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug)]
pub struct SessionResolver<A = Unconfigured, D = Unconfigured> {
    demo: DemoDirectory,
    auth: Backend<A>,
    store: Backend<D>,
}

impl SessionResolver {
    /// A resolver with no backend: only demo markers resolve.
    #[must_use]
    pub fn demo_only(demo: DemoDirectory) -> Self {
        Self::new(demo, Backend::Unavailable, Backend::Unavailable)
    }
}

impl<A: AuthProvider, D: ProfileDirectory> SessionResolver<A, D> {
    #[must_use]
    pub fn new(demo: DemoDirectory, auth: Backend<A>, store: Backend<D>) -> Self {
        Self { demo, auth, store }
    }

    #[must_use]
    pub fn demo(&self) -> &DemoDirectory {
        &self.demo
    }

    #[must_use]
    pub fn auth(&self) -> &Backend<A> {
        &self.auth
    }

    #[must_use]
    pub fn store(&self) -> &Backend<D> {
        &self.store
    }

    /// Resolves the session and reports how it was obtained.
    pub async fn resolve(&self, demo_marker: Option<&str>) -> ResolvedSession {
        if let Some(marker) = demo_marker {
            if let Some(user) = self.demo.lookup(marker) {
                tracing::debug!(marker, user = %user.id(), "resolved demo identity");
                return ResolvedSession::new(user.clone(), ResolutionState::DemoResolved);
            }
            tracing::debug!(marker, "unknown demo marker ignored");
        }

        match self.resolve_from_backend().await {
            Ok(user) => {
                tracing::debug!(user = %user.id(), role = %user.role(), "resolved stored identity");
                ResolvedSession::new(user, ResolutionState::StoreResolved)
            }
            Err(reason) => {
                reason.log();
                ResolvedSession::anonymous()
            }
        }
    }

    /// Resolves the session and returns only the user.
    pub async fn resolve_current_user(&self, demo_marker: Option<&str>) -> CurrentUser {
        self.resolve(demo_marker).await.into_user()
    }

    async fn resolve_from_backend(&self) -> Result<CurrentUser, FallbackReason> {
        let auth = self.auth.as_configured().ok_or(FallbackReason::AuthUnavailable)?;
        let identity = auth
            .session_identity()
            .await
            .map_err(FallbackReason::AuthFailed)?
            .ok_or(FallbackReason::SignedOut)?;

        let store = self.store.as_configured().ok_or(FallbackReason::StoreUnavailable)?;
        let profile = store
            .profile(&identity.id)
            .await
            .map_err(FallbackReason::ProfileFailed)?
            .ok_or(FallbackReason::ProfileMissing)?;
        let role = profile_role(&profile).map_err(FallbackReason::InvalidRole)?;

        let assignments = store
            .unit_assignments(&identity.id)
            .await
            .map_err(FallbackReason::AssignmentsFailed)?;

        let name = profile
            .full_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());
        let mut user = CurrentUser::new(identity.id, name, role).with_units(distinct_units(assignments));
        if let Some(email) = identity.email {
            user = user.with_email(email);
        }
        Ok(user)
    }
}

/// Missing or empty role means the lowest role; anything else must parse.
fn profile_role(profile: &Profile) -> Result<Role, AuthError> {
    match profile.role.as_deref().filter(|r| !r.is_empty()) {
        None => Ok(Role::lowest()),
        Some(raw) => RoleConfig::lookup(raw).map(|config| config.role),
    }
}

fn distinct_units(assignments: Vec<UnitAssignment>) -> Vec<UnitId> {
    let mut units: Vec<UnitId> = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        if !units.contains(&assignment.unit_id) {
            units.push(assignment.unit_id);
        }
    }
    units
}
