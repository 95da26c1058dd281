//! Session record persistence.
//!
//! One device holds one [`SessionRecord`]: who is signed in (demo marker or
//! backend identity), the explicit sidebar choice and the selected unit. It
//! is the single source of truth for everything the dashboard remembers
//! between requests.
//!
//! | Store | Backing | Use |
//! |-------|---------|-----|
//! | [`LocalFileStore`] | JSON file, atomic writes | CLI, default |
//! | [`MemoryStore`] | `parking_lot::RwLock` | tests, embedding |

mod error;
mod local;
mod memory;

pub use error::StorageError;
pub use local::{default_session_path, LocalFileStore};
pub use memory::MemoryStore;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use zion_auth::{PreferenceStore, SessionIdentity, SidebarPreference};
use zion_types::UnitId;

/// Per-device session state.
///
/// Signing in as a different identity clears the sidebar preference and the
/// selected unit so the new role's defaults apply.
///
/// # Example
///
/// ```
/// use zion_auth::PreferenceStore;
/// use zion_runtime::store::SessionRecord;
/// use zion_types::Role;
///
/// let mut record = SessionRecord::with_max_age_days(7);
/// record.sign_in_demo("stake-leader");
/// record.set_sidebar_preference(false);
///
/// // Switching identity drops the old preference.
/// assert!(record.sign_in_demo("viewer-harare2"));
/// assert!(!record.sidebar_preference().is_set());
/// assert!(!record.resolve_sidebar_open(Role::Viewer));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub demo_marker: Option<String>,
    #[serde(default)]
    pub identity: Option<SessionIdentity>,
    #[serde(default)]
    pub sidebar: SidebarPreference,
    #[serde(default)]
    pub selected_unit: Option<UnitId>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Creates an empty record valid for `max_age` from now.
    #[must_use]
    pub fn new(max_age: Duration) -> Self {
        let now = Utc::now();
        Self {
            demo_marker: None,
            identity: None,
            sidebar: SidebarPreference::unset(),
            selected_unit: None,
            created_at: now,
            expires_at: now + max_age,
        }
    }

    #[must_use]
    pub fn with_max_age_days(days: u32) -> Self {
        Self::new(Duration::days(i64::from(days)))
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Extends the record to `max_age` from now.
    pub fn renew(&mut self, max_age: Duration) {
        self.expires_at = Utc::now() + max_age;
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.demo_marker.is_some() || self.identity.is_some()
    }

    /// Signs in with a demo marker. Returns `true` if the identity changed.
    pub fn sign_in_demo(&mut self, marker: impl Into<String>) -> bool {
        let marker = marker.into();
        let switched = self.demo_marker.as_deref() != Some(marker.as_str()) || self.identity.is_some();
        self.demo_marker = Some(marker);
        self.identity = None;
        if switched {
            self.reset_identity_scoped_state();
        }
        switched
    }

    /// Signs in with a backend identity. Returns `true` if the identity
    /// changed.
    pub fn sign_in_account(&mut self, identity: SessionIdentity) -> bool {
        let switched = self.identity.as_ref().map(|i| &i.id) != Some(&identity.id)
            || self.demo_marker.is_some();
        self.identity = Some(identity);
        self.demo_marker = None;
        if switched {
            self.reset_identity_scoped_state();
        }
        switched
    }

    fn reset_identity_scoped_state(&mut self) {
        self.sidebar = SidebarPreference::unset();
        self.selected_unit = None;
    }
}

impl PreferenceStore for SessionRecord {
    fn sidebar_preference(&self) -> SidebarPreference {
        self.sidebar
    }

    fn set_sidebar_preference(&mut self, open: bool) {
        self.sidebar = SidebarPreference::explicit(open);
    }

    fn clear_sidebar_preference(&mut self) {
        self.sidebar = SidebarPreference::unset();
    }
}

/// Session record storage.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait SessionStore: Send + Sync {
    /// Loads the stored record, `None` if there is none.
    ///
    /// Expiry is not checked here.
    fn load(&self) -> impl Future<Output = Result<Option<SessionRecord>, StorageError>> + Send;

    /// Saves the record, replacing any previous one.
    fn save(&self, record: &SessionRecord) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Removes the stored record. Clearing an empty store succeeds.
    fn clear(&self) -> impl Future<Output = Result<(), StorageError>> + Send;
}
