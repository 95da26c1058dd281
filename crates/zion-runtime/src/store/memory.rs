//! In-memory session record storage.

use super::{SessionRecord, SessionStore, StorageError};
use parking_lot::RwLock;
use std::sync::Arc;

/// Session store kept in process memory.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Arc<RwLock<Option<SessionRecord>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `record`.
    #[must_use]
    pub fn with_record(record: SessionRecord) -> Self {
        Self {
            record: Arc::new(RwLock::new(Some(record))),
        }
    }

    /// Returns a copy of the current record without going through the
    /// async interface.
    #[must_use]
    pub fn snapshot(&self) -> Option<SessionRecord> {
        self.record.read().clone()
    }
}

impl SessionStore for MemoryStore {
    async fn load(&self) -> Result<Option<SessionRecord>, StorageError> {
        Ok(self.record.read().clone())
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), StorageError> {
        *self.record.write() = Some(record.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self.record.write() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_load_clear() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_none());

        let mut record = SessionRecord::with_max_age_days(7);
        record.sign_in_demo("stake-leader");
        store.save(&record).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(record));

        store.clear().await.unwrap();
        assert!(store.snapshot().is_none());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        store
            .save(&SessionRecord::with_max_age_days(1))
            .await
            .unwrap();
        assert!(other.snapshot().is_some());
    }
}
