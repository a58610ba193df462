//! Engine, reconciliation loop, transport seam, and rendering for Glossa.
//!
//! This crate ties the pure pieces together: parsed commands mutate the
//! language registry, open amendments age under a timed reconciliation
//! pass, and every mutation is snapshotted through the store seam. All
//! chat I/O goes through the [`ChatGateway`] trait so the engine never
//! knows which transport it is speaking to.
//!
//! # Modules
//!
//! - [`engine`] -- The single-writer engine task and its inbound queue
//! - [`reconcile`] -- The timed pass: age, tally, resolve, persist
//! - [`gateway`] -- The chat transport seam and its in-memory stub
//! - [`render`] -- Ballot, rules-summary, and dictionary text
//! - [`config`] -- YAML configuration with serde defaults
//! - [`error`] -- Engine error types

pub mod config;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod reconcile;
pub mod render;

// Re-export primary types at crate root.
pub use config::{ConfigError, EngineConfig, GlossaConfig, LoggingConfig, SnapshotConfig};
pub use engine::{Engine, EngineHandle, InboundMessage};
pub use error::EngineError;
pub use gateway::{
    ChatGateway, FetchedMessage, GatewayError, MemoryGateway, NO_REACTION, SentFile, YES_REACTION,
};
pub use reconcile::PassSummary;
