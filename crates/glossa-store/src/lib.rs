//! Snapshot codec and storage backends for the Glossa registry.
//!
//! Policy is "mutate, then immediately persist": the engine snapshots
//! the whole registry after every mutating operation (language creation,
//! amendment proposal, amendment resolution), giving crash recovery at
//! the granularity of one completed mutation.
//!
//! # Modules
//!
//! - [`codec`] -- Registry ⇄ opaque byte blob (bincode)
//! - [`file`] -- Atomic-rename file backend
//! - [`memory`] -- In-memory backend for tests
//! - [`error`] -- Store error types

pub mod codec;
pub mod error;
pub mod file;
pub mod memory;

// Re-export primary types at crate root.
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Where snapshot blobs live.
///
/// The medium is the implementation's concern; the engine only ever
/// hands blobs across this seam. Load is called once at startup, save
/// after every mutating operation.
pub trait SnapshotStore: Send + Sync {
    /// Fetch the latest snapshot blob, or `None` if none exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the medium fails.
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Persist a snapshot blob, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the medium fails. The caller treats
    /// this as aborting the mutating operation.
    fn save(&self, blob: &[u8]) -> Result<(), StoreError>;
}
