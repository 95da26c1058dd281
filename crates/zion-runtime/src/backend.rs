//! Seed-file backed implementation of the hosted backend.
//!
//! Stands in for the hosted auth provider and data store. Accounts are read
//! once from a JSON seed file:
//!
//! ```json
//! {
//!   "accounts": [
//!     {
//!       "id": "u-moyo",
//!       "email": "sister.moyo@harare.zw",
//!       "password": "secret",
//!       "full_name": "Sister Moyo",
//!       "role": "unit-leader",
//!       "units": ["norton"]
//!     }
//!   ]
//! }
//! ```
//!
//! `role` and `full_name` are optional and `role` is kept as raw text, the
//! way a hosted table would hold it; validation happens in the resolver.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use zion_auth::{
    AuthProvider, LookupError, Profile, ProfileDirectory, SessionIdentity, UnitAssignment,
};
use zion_types::{ErrorCode, UnitId, UserId};

/// Errors raised while loading the seed file.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to read seed file '{path}': {source}")]
    ReadSeed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file '{path}': {source}")]
    ParseSeed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An account uses the id of the anonymous fallback identity.
    #[error("seed file '{path}' uses the reserved id '{id}'")]
    ReservedId { path: PathBuf, id: UserId },
}

impl ErrorCode for BackendError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadSeed { .. } => "BACKEND_READ_SEED",
            Self::ParseSeed { .. } => "BACKEND_PARSE_SEED",
            Self::ReservedId { .. } => "BACKEND_RESERVED_ID",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// One account in the seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedAccount {
    pub id: UserId,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub units: Vec<UnitId>,
}

#[derive(Debug, Default, Deserialize)]
struct SeedFile {
    #[serde(default)]
    accounts: Vec<SeedAccount>,
}

/// Accounts, profiles and unit assignments held in memory.
#[derive(Debug, Clone, Default)]
pub struct LocalBackend {
    accounts: Vec<SeedAccount>,
}

impl LocalBackend {
    #[must_use]
    pub fn new(accounts: Vec<SeedAccount>) -> Self {
        Self { accounts }
    }

    /// Loads accounts from a JSON seed file.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the file cannot be read or parsed, or if
    /// an account claims the anonymous id.
    pub fn from_seed_file(path: &Path) -> Result<Self, BackendError> {
        let content = std::fs::read_to_string(path).map_err(|source| BackendError::ReadSeed {
            path: path.to_path_buf(),
            source,
        })?;
        let seed: SeedFile =
            serde_json::from_str(&content).map_err(|source| BackendError::ParseSeed {
                path: path.to_path_buf(),
                source,
            })?;
        if let Some(account) = seed.accounts.iter().find(|a| a.id.is_anonymous()) {
            return Err(BackendError::ReservedId {
                path: path.to_path_buf(),
                id: account.id.clone(),
            });
        }
        tracing::debug!(path = %path.display(), accounts = seed.accounts.len(), "loaded seed file");
        Ok(Self::new(seed.accounts))
    }

    #[must_use]
    pub fn accounts(&self) -> &[SeedAccount] {
        &self.accounts
    }

    /// Checks credentials. Emails compare case-insensitively.
    #[must_use]
    pub fn authenticate(&self, email: &str, password: &str) -> Option<SessionIdentity> {
        self.accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email.trim()) && a.password == password)
            .map(|a| SessionIdentity {
                id: a.id.clone(),
                email: Some(a.email.clone()),
            })
    }

    /// Every unit referenced by an account, in first-seen order.
    #[must_use]
    pub fn unit_catalog(&self) -> Vec<UnitId> {
        let mut units: Vec<UnitId> = Vec::new();
        for unit in self.accounts.iter().flat_map(|a| a.units.iter()) {
            if !units.contains(unit) {
                units.push(unit.clone());
            }
        }
        units
    }

    fn account(&self, id: &UserId) -> Option<&SeedAccount> {
        self.accounts.iter().find(|a| &a.id == id)
    }
}

impl ProfileDirectory for LocalBackend {
    async fn profile(&self, id: &UserId) -> Result<Option<Profile>, LookupError> {
        Ok(self.account(id).map(|a| Profile {
            full_name: a.full_name.clone(),
            role: a.role.clone(),
        }))
    }

    async fn unit_assignments(&self, id: &UserId) -> Result<Vec<UnitAssignment>, LookupError> {
        Ok(self
            .account(id)
            .map(|a| {
                a.units
                    .iter()
                    .map(|u| UnitAssignment { unit_id: u.clone() })
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Auth provider answering from the identity stored in the session record.
#[derive(Debug, Clone, Default)]
pub struct RecordedSession {
    identity: Option<SessionIdentity>,
}

impl RecordedSession {
    #[must_use]
    pub fn new(identity: Option<SessionIdentity>) -> Self {
        Self { identity }
    }
}

impl AuthProvider for RecordedSession {
    async fn session_identity(&self) -> Result<Option<SessionIdentity>, LookupError> {
        Ok(self.identity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use zion_types::assert_error_code;

    const SEED: &str = r#"{
      "accounts": [
        {
          "id": "u-moyo",
          "email": "sister.moyo@harare.zw",
          "password": "secret",
          "full_name": "Sister Moyo",
          "role": "unit-leader",
          "units": ["norton", "ruwa"]
        },
        {
          "id": "u-banda",
          "email": "banda@harare.zw",
          "password": "pw",
          "units": ["ruwa", "harare-3rd"]
        }
      ]
    }"#;

    fn backend() -> (LocalBackend, TempDir) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("seed.json");
        std::fs::write(&path, SEED).unwrap();
        (LocalBackend::from_seed_file(&path).unwrap(), temp)
    }

    #[test]
    fn loads_accounts() {
        let (backend, _temp) = backend();
        assert_eq!(backend.accounts().len(), 2);
        assert_eq!(backend.accounts()[1].role, None);
    }

    #[test]
    fn authenticate_checks_password() {
        let (backend, _temp) = backend();
        let identity = backend.authenticate("Sister.Moyo@harare.zw", "secret").unwrap();
        assert_eq!(identity.id.as_str(), "u-moyo");
        assert_eq!(identity.email.as_deref(), Some("sister.moyo@harare.zw"));
        assert!(backend.authenticate("sister.moyo@harare.zw", "wrong").is_none());
    }

    #[test]
    fn unit_catalog_is_distinct() {
        let (backend, _temp) = backend();
        assert_eq!(
            backend.unit_catalog(),
            vec![
                UnitId::new("norton"),
                UnitId::new("ruwa"),
                UnitId::new("harare-3rd")
            ]
        );
    }

    #[tokio::test]
    async fn profile_and_assignments() {
        let (backend, _temp) = backend();
        let id = UserId::new("u-moyo");
        let profile = backend.profile(&id).await.unwrap().unwrap();
        assert_eq!(profile.role.as_deref(), Some("unit-leader"));
        assert_eq!(backend.unit_assignments(&id).await.unwrap().len(), 2);

        let ghost = UserId::new("u-ghost");
        assert!(backend.profile(&ghost).await.unwrap().is_none());
        assert!(backend.unit_assignments(&ghost).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recorded_session_returns_identity() {
        let identity = SessionIdentity {
            id: UserId::new("u-1"),
            email: None,
        };
        let auth = RecordedSession::new(Some(identity.clone()));
        assert_eq!(auth.session_identity().await.unwrap(), Some(identity));
        assert_eq!(RecordedSession::default().session_identity().await.unwrap(), None);
    }

    #[test]
    fn seed_errors() {
        let temp = TempDir::new().unwrap();
        let missing = LocalBackend::from_seed_file(&temp.path().join("none.json")).unwrap_err();
        assert!(matches!(missing, BackendError::ReadSeed { .. }));
        assert_error_code(&missing, "BACKEND_");

        let path = temp.path().join("bad.json");
        std::fs::write(&path, "[1,2").unwrap();
        let bad = LocalBackend::from_seed_file(&path).unwrap_err();
        assert_eq!(bad.code(), "BACKEND_PARSE_SEED");
    }

    #[test]
    fn anonymous_id_is_reserved() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("seed.json");
        std::fs::write(
            &path,
            r#"{"accounts": [{"id": "demo-user", "email": "d@harare.zw", "password": "pw"}]}"#,
        )
        .unwrap();
        let err = LocalBackend::from_seed_file(&path).unwrap_err();
        assert!(matches!(err, BackendError::ReservedId { ref id, .. } if id.is_anonymous()));
        assert_eq!(err.code(), "BACKEND_RESERVED_ID");
    }
}
