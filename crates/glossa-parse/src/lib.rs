//! Command tokenizer and change-request validation for Glossa.
//!
//! Inbound chat text flows through two pure stages: [`tokenize`] splits
//! the raw text into a command name plus quoted arguments, and
//! [`Command::from_tokens`] validates the token list against the known
//! command shapes, producing either a typed [`Command`] or a rejection
//! that the caller logs and drops.
//!
//! # Modules
//!
//! - [`tokenize`](mod@tokenize) -- Quote-driven tokenizer with stall detection
//! - [`command`] -- Token-list validation into the [`Command`] sum type
//! - [`error`] -- The parse error taxonomy

pub mod command;
pub mod error;
pub mod tokenize;

// Re-export primary types at crate root.
pub use command::{Command, parse_command};
pub use error::{CommandError, ParseError, TokenizeError};
pub use tokenize::tokenize;
