//! Error types for the `glossa-store` crate.

/// Errors raised while encoding, decoding, loading, or saving snapshots.
///
/// These are the only errors that abort a mutating operation: continuing
/// after a failed save would leave in-memory and persisted state
/// silently divergent.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the snapshot blob failed.
    #[error("snapshot I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The registry could not be encoded to or decoded from bytes.
    #[error("snapshot codec failed: {source}")]
    Codec {
        /// The underlying bincode error.
        #[from]
        source: bincode::Error,
    },
}
