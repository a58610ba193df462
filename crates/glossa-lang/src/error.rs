//! Error types for the `glossa-lang` crate.

use glossa_types::ChannelId;

/// Errors raised by registry operations.
///
/// Apply-time reference failures (editing a word that no longer exists,
/// a rule number out of bounds) are deliberately not errors: voting has
/// already concluded and there is no rollback path, so those cases are
/// logged no-ops inside [`Language::apply`].
///
/// [`Language::apply`]: crate::Language::apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A language already exists for this origin channel.
    #[error("channel {channel} already has a language")]
    DuplicateLanguage {
        /// The channel that already owns a language.
        channel: ChannelId,
    },

    /// No language exists for this origin channel.
    #[error("channel {channel} has no language")]
    MissingLanguage {
        /// The channel with no language.
        channel: ChannelId,
    },
}
