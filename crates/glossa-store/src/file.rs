//! File-backed snapshot store with atomic replacement.

use std::fs;
use std::io::{ErrorKind, Write as _};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::StoreError;
use crate::SnapshotStore;

/// Stores the snapshot blob in a single file, replaced atomically.
///
/// Writes go to a temp file in the same directory and are renamed over
/// the target, so a crash mid-save leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(blob) => {
                debug!(path = %self.path.display(), bytes = blob.len(), "snapshot loaded");
                Ok(Some(blob))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::from(err)),
        }
    }

    fn save(&self, blob: &[u8]) -> Result<(), StoreError> {
        let parent = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        fs::create_dir_all(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent)?;
        temp.write_all(blob)?;
        temp.persist(&self.path).map_err(|err| err.error)?;
        debug!(path = %self.path.display(), bytes = blob.len(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("languages.glossa"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("languages.glossa"));
        store.save(b"snapshot bytes").unwrap();
        assert_eq!(store.load().unwrap().unwrap(), b"snapshot bytes");
    }

    #[test]
    fn save_replaces_previous_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("languages.glossa"));
        store.save(b"first").unwrap();
        store.save(b"second").unwrap();
        assert_eq!(store.load().unwrap().unwrap(), b"second");
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested/deeper/languages.glossa"));
        store.save(b"blob").unwrap();
        assert_eq!(store.load().unwrap().unwrap(), b"blob");
    }
}
