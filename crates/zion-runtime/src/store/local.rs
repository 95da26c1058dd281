//! File-based session record storage.
//!
//! The record lives in a single JSON file:
//!
//! ```text
//! ~/.zion/
//! ├── session.json
//! └── .session.json.tmp   # only during a write
//! ```

use super::{SessionRecord, SessionStore, StorageError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based session store.
///
/// # Features
///
/// - Pretty-printed JSON
/// - Atomic writes (write to temp, then rename)
/// - Parent directory created on construction
///
/// # Example
///
/// ```no_run
/// use zion_runtime::store::{LocalFileStore, SessionRecord, SessionStore};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = LocalFileStore::new(PathBuf::from("~/.zion/session.json"))?;
/// store.save(&SessionRecord::with_max_age_days(7)).await?;
/// assert!(store.load().await?.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    path: PathBuf,
}

impl LocalFileStore {
    /// Creates a store writing to `path`.
    ///
    /// A leading `~/` is expanded to the home directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DirectoryCreation` if the parent directory
    /// cannot be created.
    pub fn new(path: PathBuf) -> Result<Self, StorageError> {
        let expanded = expand_tilde(&path);

        if let Some(parent) = expanded.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StorageError::directory_creation(parent, e))?;
            }
        }

        Ok(Self { path: expanded })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "session.json".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

impl SessionStore for LocalFileStore {
    async fn load(&self) -> Result<Option<SessionRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path).await?;
        let record = serde_json::from_str(&json)?;

        Ok(Some(record))
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(record)?;
        let temp_path = self.temp_path();

        fs::write(&temp_path, &json).await?;
        fs::rename(&temp_path, &self.path).await?;

        tracing::debug!(path = %self.path.display(), "session record saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path).await?;
            tracing::debug!(path = %self.path.display(), "session record removed");
        }
        Ok(())
    }
}

/// Expands `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(rest) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
    }
    path.to_path_buf()
}

/// Returns the default session record path.
#[must_use]
pub fn default_session_path() -> PathBuf {
    crate::config::default_config_dir().join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use zion_auth::PreferenceStore;
    use zion_types::UnitId;

    fn test_store() -> (LocalFileStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = LocalFileStore::new(temp.path().join("nested").join("session.json")).unwrap();
        (store, temp)
    }

    #[tokio::test]
    async fn save_and_load() {
        let (store, _temp) = test_store();

        let mut record = SessionRecord::with_max_age_days(7);
        record.sign_in_demo("ysa-leader");
        record.set_sidebar_preference(false);
        record.selected_unit = Some(UnitId::new("ysa-branch"));

        store.save(&record).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();

        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn load_missing_is_none() {
        let (store, _temp) = test_store();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_removes_file_and_is_idempotent() {
        let (store, _temp) = test_store();
        store.save(&SessionRecord::with_max_age_days(1)).await.unwrap();
        assert!(store.path().exists());

        store.clear().await.unwrap();
        assert!(!store.path().exists());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let (store, _temp) = test_store();
        store.save(&SessionRecord::with_max_age_days(1)).await.unwrap();
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let (store, _temp) = test_store();
        std::fs::write(store.path(), "{not json").unwrap();
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn creates_parent_directory() {
        let (store, _temp) = test_store();
        assert!(store.path().parent().unwrap().is_dir());
    }

    #[test]
    fn expand_tilde_uses_home() {
        let expanded = expand_tilde(Path::new("~/.zion/session.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join(".zion/session.json"));
        }
        assert_eq!(expand_tilde(Path::new("/abs")), PathBuf::from("/abs"));
    }
}
