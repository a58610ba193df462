//! Registry ⇄ byte-blob codec.
//!
//! The whole registry serializes to one opaque blob: per language its
//! name, ordered words, origin channel, ordered rules, rules-summary
//! message reference, and ordered open amendments with their remaining
//! time and ballot references. The storage medium is the store backend's
//! concern; this module only shapes the bytes.

use glossa_lang::Registry;

use crate::error::StoreError;

/// Encode the full registry into a snapshot blob.
///
/// # Errors
///
/// Returns [`StoreError::Codec`] if serialization fails.
pub fn encode(registry: &Registry) -> Result<Vec<u8>, StoreError> {
    Ok(bincode::serialize(registry)?)
}

/// Decode a snapshot blob back into a registry.
///
/// # Errors
///
/// Returns [`StoreError::Codec`] if the blob is not a valid snapshot.
pub fn decode(blob: &[u8]) -> Result<Registry, StoreError> {
    Ok(bincode::deserialize(blob)?)
}
