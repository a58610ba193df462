//! Error types for the `glossa-parse` crate.
//!
//! Every parse failure drops the submission at the point of detection;
//! none of these errors ever becomes a pending amendment. Callers log
//! them and move on.

/// The raw text could not be split into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("malformed command: unbalanced quoting")]
pub struct TokenizeError;

/// A token list did not validate against any known command shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The command name or argument count matches no known command.
    #[error("unrecognized command '{name}' with {args} argument(s)")]
    UnrecognizedCommand {
        /// The command name as typed.
        name: String,
        /// How many arguments were supplied.
        args: usize,
    },

    /// A rule-number argument did not parse as an unsigned integer.
    #[error("invalid numeric argument: '{raw}'")]
    InvalidNumericArgument {
        /// The argument as typed.
        raw: String,
    },

    /// An `editword` field name outside text/pronunciation/definition.
    #[error("unknown word field: '{raw}'")]
    InvalidWordField {
        /// The field name as typed.
        raw: String,
    },
}

/// Any failure between raw text and a validated [`Command`].
///
/// [`Command`]: crate::Command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Tokenization failed.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    /// Validation of the token list failed.
    #[error(transparent)]
    Command(#[from] CommandError),
}
