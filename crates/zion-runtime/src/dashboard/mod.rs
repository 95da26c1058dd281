//! Dashboard assembly.
//!
//! [`Dashboard`] ties the session record, the demo directory and the local
//! backend to the authorization model. Every operation reads the record,
//! resolves the current user afresh and derives what the UI needs from it.
//!
//! ```text
//! SessionStore::load ──► expired? ──► clear
//!         │
//!         ▼ SessionRecord { demo_marker, identity, sidebar, selected_unit }
//! SessionResolver::resolve
//!         │
//!         ▼ CurrentUser
//! filter_navigation · resolve_sidebar_open · select_unit · check_page
//!         │
//!         ▼
//!   DashboardView
//! ```

mod error;

pub use error::{DashboardError, SignInError};

use crate::backend::{LocalBackend, RecordedSession};
use crate::config::ZionConfig;
use crate::store::{LocalFileStore, SessionRecord, SessionStore, StorageError};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Arc;
use zion_auth::{
    allowed_units, check_page, default_tree, filter_navigation, reset_to_role_default,
    resolve_sidebar_open, role_config, select_unit, Backend, CurrentUser, DemoDirectory,
    GuardDecision, NavTree, PermissionPolicy, PreferenceStore, ResolutionState, ResolvedSession,
    RoleConfig, RolePolicy, SessionResolver, SidebarPreference,
};
use zion_types::{Permission, UnitId};

/// How a list of permissions is combined by [`Dashboard::check`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckMode {
    /// At least one permission must be held.
    #[default]
    Any,
    /// Every permission must be held.
    All,
}

/// Access decision for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub path: String,
    pub decision: GuardDecision,
}

/// Everything the dashboard shell renders for one request.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub user: CurrentUser,
    pub state: ResolutionState,
    pub role: &'static RoleConfig,
    pub navigation: NavTree,
    pub sidebar_open: bool,
    pub sidebar_preference: SidebarPreference,
    pub selected_unit: Option<UnitId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Session-aware entry point of the dashboard.
///
/// # Example
///
/// ```
/// use zion_runtime::{store::MemoryStore, Dashboard};
/// use zion_types::Role;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let dashboard = Dashboard::new(MemoryStore::new());
///
/// dashboard.sign_in("stake.leader@harare.zw", "StakeLeader123!").await.unwrap();
/// let view = dashboard.view(Some("/user-management")).await.unwrap();
///
/// assert_eq!(view.user.role(), Role::StakeLeader);
/// assert!(view.sidebar_open);
/// assert!(view.page.unwrap().decision.is_granted());
/// # });
/// ```
#[derive(Debug)]
pub struct Dashboard<S> {
    store: S,
    demo: DemoDirectory,
    backend: Backend<Arc<LocalBackend>>,
    catalog: Vec<UnitId>,
    max_age: Duration,
}

impl Dashboard<LocalFileStore> {
    /// Builds a dashboard from resolved configuration.
    ///
    /// The backend is only loaded when `[backend]` names both a URL and a
    /// key. A configured backend without a seed file has no accounts.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] if the session directory cannot be
    /// created or the seed file cannot be loaded.
    pub fn from_config(config: &ZionConfig) -> Result<Self, DashboardError> {
        let store = LocalFileStore::new(config.session.resolved_path())?;

        let demo = if config.demo.enabled {
            DemoDirectory::builtin()
        } else {
            DemoDirectory::empty()
        };

        let mut dashboard = Self::new(store)
            .with_demo(demo)
            .with_catalog(config.units.catalog.clone())
            .with_max_age(Duration::days(i64::from(config.session.max_age_days)));

        if config.backend.is_configured() {
            let backend = match &config.backend.seed_file {
                Some(path) => LocalBackend::from_seed_file(path)?,
                None => {
                    tracing::warn!("backend configured without a seed file, no accounts available");
                    LocalBackend::default()
                }
            };
            dashboard = dashboard.with_backend(backend);
        } else {
            tracing::debug!("backend not configured, demo identities only");
        }

        Ok(dashboard)
    }
}

impl<S: SessionStore> Dashboard<S> {
    /// Creates a dashboard with the built-in demo identities and no backend.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            demo: DemoDirectory::builtin(),
            backend: Backend::Unavailable,
            catalog: Vec::new(),
            max_age: Duration::days(7),
        }
    }

    #[must_use]
    pub fn with_demo(mut self, demo: DemoDirectory) -> Self {
        self.demo = demo;
        self
    }

    #[must_use]
    pub fn with_backend(mut self, backend: LocalBackend) -> Self {
        self.backend = Backend::Configured(Arc::new(backend));
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: Vec<UnitId>) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn demo(&self) -> &DemoDirectory {
        &self.demo
    }

    #[must_use]
    pub fn has_backend(&self) -> bool {
        self.backend.is_configured()
    }

    /// Units a stake-wide role may choose from.
    ///
    /// The configured catalog wins; otherwise every unit known to the
    /// backend accounts and demo identities, in first-seen order.
    #[must_use]
    pub fn catalog(&self) -> Vec<UnitId> {
        if !self.catalog.is_empty() {
            return self.catalog.clone();
        }

        let backend_units = self
            .backend
            .as_configured()
            .map(|b| b.unit_catalog())
            .unwrap_or_default();
        let demo_units = self
            .demo
            .markers()
            .filter_map(|m| self.demo.lookup(m))
            .flat_map(|u| u.units().iter().cloned());

        let mut units: Vec<UnitId> = Vec::new();
        for unit in backend_units.into_iter().chain(demo_units) {
            if !units.contains(&unit) {
                units.push(unit);
            }
        }
        units
    }

    /// Resolves the current user.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Storage`] if the record cannot be read.
    pub async fn current_user(&self) -> Result<ResolvedSession, DashboardError> {
        let record = self.active_record().await?;
        Ok(self.resolve(record.as_ref()).await)
    }

    /// Builds the view for one request, optionally checking `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Storage`] if the record cannot be read.
    pub async fn view(&self, path: Option<&str>) -> Result<DashboardView, DashboardError> {
        let record = self.active_record().await?;
        let session = self.resolve(record.as_ref()).await;
        let user = &session.user;

        let sidebar_preference = record.as_ref().map(|r| r.sidebar).unwrap_or_default();
        let persisted_unit = record.as_ref().and_then(|r| r.selected_unit.as_ref());
        let selected_unit = select_unit(user, persisted_unit, &self.catalog());
        let page = path.map(|p| PageView {
            path: p.to_string(),
            decision: check_page(p, user),
        });

        Ok(DashboardView {
            role: role_config(user.role()),
            navigation: filter_navigation(user.role(), default_tree()),
            sidebar_open: resolve_sidebar_open(user.role(), sidebar_preference),
            sidebar_preference,
            selected_unit,
            page,
            expires_at: record.map(|r| r.expires_at),
            user: session.user,
            state: session.state,
        })
    }

    /// Signs in with email and password.
    ///
    /// Demo credentials are tried first, then the backend. Signing in as a
    /// different identity drops the previous sidebar preference and unit.
    ///
    /// # Errors
    ///
    /// - [`SignInError::AuthenticationUnavailable`] when the credentials are
    ///   not a demo login and no backend is configured
    /// - [`SignInError::InvalidCredentials`] when the backend rejects them
    /// - [`SignInError::Storage`] if the record cannot be saved
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<ResolvedSession, SignInError> {
        let mut record = self
            .active_record()
            .await?
            .unwrap_or_else(|| SessionRecord::new(self.max_age));

        let switched = if let Some(marker) = self.demo.authenticate(email, password) {
            record.sign_in_demo(marker)
        } else {
            let Some(backend) = self.backend.as_configured() else {
                tracing::warn!(email, "sign-in attempted without a configured backend");
                return Err(SignInError::AuthenticationUnavailable);
            };
            let Some(identity) = backend.authenticate(email, password) else {
                tracing::warn!(email, "sign-in rejected");
                return Err(SignInError::InvalidCredentials);
            };
            record.sign_in_account(identity)
        };

        record.renew(self.max_age);
        self.store.save(&record).await?;

        let session = self.resolve(Some(&record)).await;
        tracing::info!(
            user = %session.user.id(),
            role = %session.user.role(),
            state = %session.state,
            switched,
            "signed in"
        );
        Ok(session)
    }

    /// Signs out by removing the session record.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Storage`] if the record cannot be removed.
    pub async fn sign_out(&self) -> Result<(), DashboardError> {
        self.store.clear().await?;
        tracing::info!("signed out");
        Ok(())
    }

    /// Stores an explicit sidebar choice and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Storage`] on persistence failure.
    pub async fn set_sidebar(&self, open: bool) -> Result<bool, DashboardError> {
        let mut record = self
            .active_record()
            .await?
            .unwrap_or_else(|| SessionRecord::new(self.max_age));
        record.set_sidebar_preference(open);
        self.store.save(&record).await?;
        tracing::debug!(open, "sidebar preference stored");
        Ok(open)
    }

    /// Forgets the sidebar choice and returns the role default.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Storage`] on persistence failure.
    pub async fn reset_sidebar(&self) -> Result<bool, DashboardError> {
        let record = self.active_record().await?;
        let role = self.resolve(record.as_ref()).await.user.role();

        match record {
            Some(mut record) => {
                let open = reset_to_role_default(&mut record, role);
                self.store.save(&record).await?;
                Ok(open)
            }
            None => Ok(resolve_sidebar_open(role, SidebarPreference::unset())),
        }
    }

    /// Selects the working unit.
    ///
    /// # Errors
    ///
    /// - [`DashboardError::UnitNotAllowed`] if `unit` is outside the user's
    ///   allowed set
    /// - [`DashboardError::Storage`] on persistence failure
    pub async fn select_unit(&self, unit: UnitId) -> Result<UnitId, DashboardError> {
        let record = self.active_record().await?;
        let user = self.resolve(record.as_ref()).await.into_user();

        if !allowed_units(&user, &self.catalog()).contains(&unit) {
            tracing::warn!(user = %user.id(), unit = %unit, "unit selection rejected");
            return Err(DashboardError::UnitNotAllowed {
                unit,
                user: user.id().clone(),
            });
        }

        let mut record = record.unwrap_or_else(|| SessionRecord::new(self.max_age));
        record.selected_unit = Some(unit.clone());
        self.store.save(&record).await?;
        tracing::debug!(user = %user.id(), unit = %unit, "unit selected");
        Ok(unit)
    }

    /// Checks `permissions` against the current user's role.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Storage`] if the record cannot be read.
    pub async fn check(
        &self,
        permissions: &[Permission],
        mode: CheckMode,
    ) -> Result<bool, DashboardError> {
        let role = self.current_user().await?.user.role();
        Ok(match mode {
            CheckMode::Any => RolePolicy.has_any_permission(role, permissions),
            CheckMode::All => RolePolicy.has_all_permissions(role, permissions),
        })
    }

    /// Decides whether the current user may open `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Storage`] if the record cannot be read.
    pub async fn guard(&self, path: &str) -> Result<GuardDecision, DashboardError> {
        let user = self.current_user().await?.into_user();
        Ok(check_page(path, &user))
    }

    /// Loads the record, discarding it if expired or unreadable.
    async fn active_record(&self) -> Result<Option<SessionRecord>, StorageError> {
        let record = match self.store.load().await {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(None),
            Err(StorageError::Serialization(e)) => {
                tracing::warn!(error = %e, "discarding malformed session record");
                self.store.clear().await?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        if record.is_expired() {
            tracing::debug!(expires_at = %record.expires_at, "session record expired");
            self.store.clear().await?;
            return Ok(None);
        }
        Ok(Some(record))
    }

    async fn resolve(&self, record: Option<&SessionRecord>) -> ResolvedSession {
        let auth = match &self.backend {
            Backend::Configured(_) => {
                Backend::Configured(RecordedSession::new(record.and_then(|r| r.identity.clone())))
            }
            Backend::Unavailable => Backend::Unavailable,
        };
        let resolver = SessionResolver::new(self.demo.clone(), auth, self.backend.clone());
        resolver
            .resolve(record.and_then(|r| r.demo_marker.as_deref()))
            .await
    }
}
