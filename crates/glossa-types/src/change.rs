//! Change requests: the typed payload of an amendment.
//!
//! Each community command that goes through the voting pipeline maps to
//! exactly one [`ChangeRequest`] variant. Apply logic matches on the
//! variant exhaustively, so adding a command is a compile-time checklist
//! rather than a string comparison.

use serde::{Deserialize, Serialize};

/// The editable fields of a word, as named in the `editword` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordField {
    /// The word text itself (the lookup key).
    Text,
    /// The pronunciation field.
    Pronunciation,
    /// The definition field.
    Definition,
}

impl WordField {
    /// Parse a user-supplied field name, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "pronunciation" => Some(Self::Pronunciation),
            "definition" => Some(Self::Definition),
            _ => None,
        }
    }
}

impl core::fmt::Display for WordField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Pronunciation => "pronunciation",
            Self::Definition => "definition",
        };
        write!(f, "{name}")
    }
}

/// A proposed change to a language, carrying exactly the data needed to
/// apply itself once approved.
///
/// Rule numbers are 1-indexed as users see them; conversion to 0-indexed
/// storage happens at apply time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeRequest {
    /// Append a rule to the end of the rule list.
    AddRule {
        /// The rule text.
        text: String,
    },
    /// Replace the text of an existing rule.
    EditRule {
        /// 1-indexed rule number.
        number: usize,
        /// The replacement text.
        text: String,
    },
    /// Delete an existing rule.
    RemoveRule {
        /// 1-indexed rule number.
        number: usize,
    },
    /// Change the language's name.
    RenameLanguage {
        /// The new name.
        name: String,
    },
    /// Add a new word to the dictionary.
    AddWord {
        /// The word text (lookup key).
        text: String,
        /// The pronunciation.
        pronunciation: String,
        /// The definition.
        definition: String,
        /// Related-word keys, in encounter order.
        related: Vec<String>,
    },
    /// Remove a word from the dictionary.
    RemoveWord {
        /// The word text to remove.
        text: String,
    },
    /// Overwrite one field of an existing word.
    EditWord {
        /// The word text to edit.
        text: String,
        /// Which field to overwrite.
        field: WordField,
        /// The new field value.
        value: String,
    },
    /// Link a word to another word.
    AddRelatedWord {
        /// The word receiving the link.
        text: String,
        /// The word being linked to.
        related: String,
    },
    /// Unlink a word from another word.
    RemoveRelatedWord {
        /// The word losing the link.
        text: String,
        /// The word being unlinked.
        related: String,
    },
}

impl ChangeRequest {
    /// A short static label for the change variant, used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddRule { .. } => "add_rule",
            Self::EditRule { .. } => "edit_rule",
            Self::RemoveRule { .. } => "remove_rule",
            Self::RenameLanguage { .. } => "rename_language",
            Self::AddWord { .. } => "add_word",
            Self::RemoveWord { .. } => "remove_word",
            Self::EditWord { .. } => "edit_word",
            Self::AddRelatedWord { .. } => "add_related_word",
            Self::RemoveRelatedWord { .. } => "remove_related_word",
        }
    }
}

/// The outcome of tallying a ballot's votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallotDecision {
    /// Strictly more yes than no votes; the change is applied.
    Approved,
    /// A tie, a zero vote, or a no majority; the change is discarded.
    Rejected,
}
