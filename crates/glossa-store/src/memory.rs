//! In-memory snapshot store for tests and ephemeral runs.

use std::sync::Mutex;

use crate::error::StoreError;
use crate::SnapshotStore;

/// Holds the latest snapshot blob in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<Vec<u8>>>,
    saves: Mutex<u64>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `save` has been called. Lets tests assert that a
    /// mutation was followed by a persistence call.
    pub fn save_count(&self) -> u64 {
        self.saves.lock().map_or(0, |count| *count)
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.blob.lock().map_or(None, |blob| blob.clone()))
    }

    fn save(&self, blob: &[u8]) -> Result<(), StoreError> {
        if let Ok(mut slot) = self.blob.lock() {
            *slot = Some(blob.to_vec());
        }
        if let Ok(mut count) = self.saves.lock() {
            *count = count.saturating_add(1);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_counts_saves() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.save_count(), 0);

        store.save(b"blob").unwrap();
        assert_eq!(store.load().unwrap().unwrap(), b"blob");
        assert_eq!(store.save_count(), 1);
    }
}
