//! Language aggregate, per-channel registry, and the amendment ledger.
//!
//! This crate owns the state the community governs: each [`Language`]
//! holds its rules, dictionary, and the amendments currently open for
//! voting. The [`Registry`] maps origin channels to languages, enforcing
//! one language per channel. Amendment lifecycle operations — propose,
//! tally, apply-or-discard — live here; the timed loop that drives them
//! lives in `glossa-core`.
//!
//! # Invariants
//!
//! - A language's origin channel is set at creation and never changes.
//! - An amendment is removed from its language's open list in the same
//!   step its apply logic runs: exactly one terminal transition per
//!   amendment.
//! - A word's related-word set never contains the word's own key.
//!
//! # Modules
//!
//! - [`language`] -- The [`Language`] aggregate and apply semantics
//! - [`registry`] -- Channel-keyed language lookup and creation
//! - [`ledger`] -- Vote tallying
//! - [`error`] -- Registry error types

pub mod error;
pub mod language;
pub mod ledger;
pub mod registry;

// Re-export primary types at crate root.
pub use error::RegistryError;
pub use language::Language;
pub use ledger::tally;
pub use registry::Registry;
