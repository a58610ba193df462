//! The [`Word`] entry: the unit of content in a language's dictionary.

use serde::{Deserialize, Serialize};

/// A single dictionary entry in a language.
///
/// `text` doubles as the lookup key for edit/remove/related-word
/// operations. Related words are non-owning key references, resolved by
/// lookup at use time; a key whose word has since been removed simply
/// resolves to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// The word itself, used as the lookup key (case-sensitive).
    pub text: String,
    /// How the word is pronounced.
    pub pronunciation: String,
    /// What the word means.
    pub definition: String,
    /// Ordered set of related-word keys. Never contains this word's own
    /// key and never contains duplicates.
    pub related_words: Vec<String>,
}

impl Word {
    /// Create a word, filtering the related list of self-references and
    /// duplicates to uphold the related-set invariants.
    pub fn new(
        text: impl Into<String>,
        pronunciation: impl Into<String>,
        definition: impl Into<String>,
        related: Vec<String>,
    ) -> Self {
        let mut word = Self {
            text: text.into(),
            pronunciation: pronunciation.into(),
            definition: definition.into(),
            related_words: Vec::new(),
        };
        for key in related {
            word.add_related(&key);
        }
        word
    }

    /// Append a related-word key, skipping self-references and keys
    /// already present. Returns whether the set changed.
    pub fn add_related(&mut self, key: &str) -> bool {
        if key == self.text || self.related_words.iter().any(|existing| existing == key) {
            return false;
        }
        self.related_words.push(key.to_owned());
        true
    }

    /// Remove a related-word key if present. Returns whether the set changed.
    pub fn remove_related(&mut self, key: &str) -> bool {
        let before = self.related_words.len();
        self.related_words.retain(|existing| existing != key);
        self.related_words.len() != before
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_filters_self_reference() {
        let word = Word::new("sol", "soh-l", "the sun", vec!["sol".to_owned(), "lun".to_owned()]);
        assert_eq!(word.related_words, vec!["lun"]);
    }

    #[test]
    fn new_filters_duplicates() {
        let word = Word::new("sol", "soh-l", "the sun", vec!["lun".to_owned(), "lun".to_owned()]);
        assert_eq!(word.related_words, vec!["lun"]);
    }

    #[test]
    fn add_related_rejects_own_key() {
        let mut word = Word::new("sol", "soh-l", "the sun", Vec::new());
        assert!(!word.add_related("sol"));
        assert!(word.related_words.is_empty());
    }

    #[test]
    fn remove_related_reports_change() {
        let mut word = Word::new("sol", "soh-l", "the sun", vec!["lun".to_owned()]);
        assert!(word.remove_related("lun"));
        assert!(!word.remove_related("lun"));
        assert!(word.related_words.is_empty());
    }
}
