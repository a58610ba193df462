//! Shared type definitions for the Glossa language governance engine.
//!
//! This crate is the single source of truth for the types that cross
//! crate boundaries in the Glossa workspace: identifiers, dictionary
//! entries, change requests, and pending amendments.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe wrappers for transport snowflakes and amendment UUIDs
//! - [`word`] -- The [`Word`] dictionary entry and its related-set invariants
//! - [`change`] -- The [`ChangeRequest`] sum type and ballot decision
//! - [`amendment`] -- The [`Amendment`] pending-change record and its timer

pub mod amendment;
pub mod change;
pub mod ids;
pub mod word;

// Re-export all public types at crate root for convenience.
pub use amendment::Amendment;
pub use change::{BallotDecision, ChangeRequest, WordField};
pub use ids::{AmendmentId, ChannelId, MessageRef, UserId};
pub use word::Word;
