//! The per-channel language registry: one language per origin channel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use glossa_types::ChannelId;

use crate::error::RegistryError;
use crate::language::Language;

/// All languages known to the engine, keyed by origin channel.
///
/// Owned exclusively by the reconciliation engine and passed explicitly
/// to every function that needs it — there is no ambient singleton. The
/// registry is the unit of persistence: a snapshot encodes the whole
/// thing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// Languages by origin channel, in stable channel order.
    languages: BTreeMap<ChannelId, Language>,
}

impl Registry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            languages: BTreeMap::new(),
        }
    }

    /// Create a language bound to `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateLanguage`] if the channel
    /// already has one; the existing language is untouched.
    pub fn create(
        &mut self,
        channel: ChannelId,
        name: impl Into<String>,
    ) -> Result<&mut Language, RegistryError> {
        match self.languages.entry(channel) {
            std::collections::btree_map::Entry::Occupied(_) => {
                Err(RegistryError::DuplicateLanguage { channel })
            }
            std::collections::btree_map::Entry::Vacant(slot) => {
                let language = Language::new(name, channel);
                info!(%channel, language = %language.name, "language created");
                Ok(slot.insert(language))
            }
        }
    }

    /// The language for `channel`, if one exists.
    pub fn get(&self, channel: ChannelId) -> Option<&Language> {
        self.languages.get(&channel)
    }

    /// Mutable access to the language for `channel`.
    pub fn get_mut(&mut self, channel: ChannelId) -> Option<&mut Language> {
        self.languages.get_mut(&channel)
    }

    /// The language for `channel`, or [`RegistryError::MissingLanguage`].
    pub fn require_mut(&mut self, channel: ChannelId) -> Result<&mut Language, RegistryError> {
        self.languages
            .get_mut(&channel)
            .ok_or(RegistryError::MissingLanguage { channel })
    }

    /// The origin channels of every language, in stable order.
    ///
    /// The reconciliation pass iterates over this owned list so language
    /// borrows can be scoped to one amendment step at a time.
    pub fn channels(&self) -> Vec<ChannelId> {
        self.languages.keys().copied().collect()
    }

    /// Iterate over all languages in stable channel order.
    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.values()
    }

    /// Number of languages in the registry.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether the registry holds no languages.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn create_binds_language_to_channel() {
        let mut registry = Registry::new();
        let channel = ChannelId::new(10);
        registry.create(channel, "Auri").unwrap();
        assert_eq!(registry.get(channel).unwrap().name, "Auri");
        assert_eq!(registry.get(channel).unwrap().channel(), channel);
    }

    #[test]
    fn duplicate_creation_rejects_and_preserves_original() {
        let mut registry = Registry::new();
        let channel = ChannelId::new(10);
        registry.create(channel, "Auri").unwrap();

        let err = registry.create(channel, "Second").unwrap_err();
        assert_eq!(err, RegistryError::DuplicateLanguage { channel });
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(channel).unwrap().name, "Auri");
    }

    #[test]
    fn one_language_per_channel_many_channels() {
        let mut registry = Registry::new();
        registry.create(ChannelId::new(1), "Auri").unwrap();
        registry.create(ChannelId::new(2), "Beth").unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.channels(), vec![ChannelId::new(1), ChannelId::new(2)]);
    }

    #[test]
    fn require_mut_reports_missing_language() {
        let mut registry = Registry::new();
        let channel = ChannelId::new(99);
        let err = registry.require_mut(channel).unwrap_err();
        assert_eq!(err, RegistryError::MissingLanguage { channel });
    }
}
