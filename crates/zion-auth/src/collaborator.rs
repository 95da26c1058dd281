//! External collaborators consumed by the session resolver.
//!
//! The hosted backend provides two services: an auth provider that knows
//! the current session, and a data store holding profiles and unit-role
//! assignments. Either may be absent from a deployment, which is modelled
//! with [`Backend::Unavailable`] instead of a nullable client.
//!
//! ```text
//! SessionResolver
//!   ├── Backend<impl AuthProvider>      session_identity()
//!   └── Backend<impl ProfileDirectory>  profile(id), unit_assignments(id)
//! ```

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use zion_types::{ErrorCode, UnitId, UserId};

/// A collaborator that may not be configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend<T> {
    Configured(T),
    Unavailable,
}

impl<T> Backend<T> {
    #[must_use]
    pub fn as_configured(&self) -> Option<&T> {
        match self {
            Self::Configured(inner) => Some(inner),
            Self::Unavailable => None,
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }
}

impl<T> From<Option<T>> for Backend<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unavailable, Self::Configured)
    }
}

/// Identity carried by an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

/// Stored profile row.
///
/// `role` stays a raw string here: it is validated against the registry by
/// the resolver, not by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// One unit-role assignment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitAssignment {
    pub unit_id: UnitId,
}

/// Failure reported by a collaborator call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{service} lookup failed: {message}")]
pub struct LookupError {
    pub service: &'static str,
    pub message: String,
}

impl LookupError {
    #[must_use]
    pub fn new(service: &'static str, message: impl Into<String>) -> Self {
        Self {
            service,
            message: message.into(),
        }
    }
}

impl ErrorCode for LookupError {
    fn code(&self) -> &'static str {
        "AUTH_LOOKUP_FAILED"
    }

    fn is_recoverable(&self) -> bool {
        true
    }
}

/// Auth provider: who, if anyone, is signed in.
pub trait AuthProvider: Send + Sync {
    /// Returns the identity of the current session, `None` if signed out.
    fn session_identity(
        &self,
    ) -> impl Future<Output = Result<Option<SessionIdentity>, LookupError>> + Send;
}

/// Data store: profiles and unit assignments keyed by user id.
pub trait ProfileDirectory: Send + Sync {
    /// Returns the profile row, `None` if the user has none.
    fn profile(
        &self,
        id: &UserId,
    ) -> impl Future<Output = Result<Option<Profile>, LookupError>> + Send;

    /// Returns every unit assignment of the user, in store order.
    fn unit_assignments(
        &self,
        id: &UserId,
    ) -> impl Future<Output = Result<Vec<UnitAssignment>, LookupError>> + Send;
}

impl<T: AuthProvider + ?Sized> AuthProvider for Arc<T> {
    async fn session_identity(&self) -> Result<Option<SessionIdentity>, LookupError> {
        (**self).session_identity().await
    }
}

impl<T: ProfileDirectory + ?Sized> ProfileDirectory for Arc<T> {
    async fn profile(&self, id: &UserId) -> Result<Option<Profile>, LookupError> {
        (**self).profile(id).await
    }

    async fn unit_assignments(&self, id: &UserId) -> Result<Vec<UnitAssignment>, LookupError> {
        (**self).unit_assignments(id).await
    }
}

/// Placeholder collaborator type for deployments without a backend.
///
/// Uninhabited: only `Backend::<Unconfigured>::Unavailable` can exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unconfigured {}

impl AuthProvider for Unconfigured {
    async fn session_identity(&self) -> Result<Option<SessionIdentity>, LookupError> {
        match *self {}
    }
}

impl ProfileDirectory for Unconfigured {
    async fn profile(&self, _id: &UserId) -> Result<Option<Profile>, LookupError> {
        match *self {}
    }

    async fn unit_assignments(&self, _id: &UserId) -> Result<Vec<UnitAssignment>, LookupError> {
        match *self {}
    }
}
