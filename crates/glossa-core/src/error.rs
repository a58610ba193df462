//! Error types for the `glossa-core` crate.

use glossa_store::StoreError;

use crate::gateway::GatewayError;

/// Errors surfaced by engine operations.
///
/// Only persistence failures propagate out of a reconciliation pass or a
/// command handler: continuing past a failed snapshot would leave
/// in-memory and persisted state silently divergent. Everything else
/// (parse rejections, missing languages, transient gateway failures) is
/// resolved where it is detected and logged. No error is fatal to the
/// process.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Snapshot encode/decode or storage failed.
    #[error("snapshot error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },

    /// A gateway operation failed in a context with no retry path.
    #[error("gateway error: {source}")]
    Gateway {
        /// The underlying gateway error.
        #[from]
        source: GatewayError,
    },
}
