//! The [`Language`] aggregate: rules, words, and open amendments for one
//! origin channel.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use glossa_types::{Amendment, AmendmentId, BallotDecision, ChangeRequest, ChannelId, MessageRef, Word, WordField};

/// A collaboratively governed constructed language.
///
/// The language exclusively owns its words and its open amendments.
/// Related-word links between words are key references, not ownership,
/// so removing a word never requires graph cleanup — stale keys resolve
/// to nothing at use time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// The language's current name.
    pub name: String,
    /// The origin channel. Set once at creation, never changed.
    channel: ChannelId,
    /// Ordered rules; 1-indexed in every user-facing surface.
    pub rules: Vec<String>,
    /// The rendered rules-summary message, re-edited when rules change.
    pub summary: Option<MessageRef>,
    /// Ordered dictionary entries.
    pub words: Vec<Word>,
    /// Amendments currently open for voting, in proposal order.
    pub amendments: Vec<Amendment>,
    /// Whether the rules summary needs re-rendering. Transient render
    /// hint, consumed and cleared by the reconciliation pass.
    #[serde(skip)]
    pub rules_dirty: bool,
}

impl Language {
    /// Create a language bound to its origin channel.
    pub fn new(name: impl Into<String>, channel: ChannelId) -> Self {
        Self {
            name: name.into(),
            channel,
            rules: Vec::new(),
            summary: None,
            words: Vec::new(),
            amendments: Vec::new(),
            rules_dirty: false,
        }
    }

    /// The origin channel this language is bound to.
    pub const fn channel(&self) -> ChannelId {
        self.channel
    }

    /// Look up a word by its text, first case-sensitive match.
    pub fn get_word(&self, text: &str) -> Option<&Word> {
        self.words.iter().find(|word| word.text == text)
    }

    /// Mutable lookup by text, first case-sensitive match.
    pub fn get_word_mut(&mut self, text: &str) -> Option<&mut Word> {
        self.words.iter_mut().find(|word| word.text == text)
    }

    /// Open a new amendment for voting. This is the only creation path
    /// for amendments.
    pub fn propose(
        &mut self,
        request: ChangeRequest,
        ballot: MessageRef,
        window_ms: i64,
    ) -> AmendmentId {
        let amendment = Amendment::new(request, ballot, window_ms);
        let id = amendment.id;
        info!(
            language = %self.name,
            amendment = %id,
            change = amendment.request.kind(),
            "amendment proposed"
        );
        self.amendments.push(amendment);
        id
    }

    /// Resolve the open amendment at `index` with the tallied decision.
    ///
    /// The amendment is removed from the open list in the same step that
    /// its apply logic runs, so exactly one terminal transition ever
    /// executes per amendment. Returns the resolved amendment, or `None`
    /// if `index` is out of range.
    pub fn resolve_at(&mut self, index: usize, decision: BallotDecision) -> Option<Amendment> {
        if index >= self.amendments.len() {
            return None;
        }
        let amendment = self.amendments.remove(index);
        match decision {
            BallotDecision::Approved => {
                info!(
                    language = %self.name,
                    amendment = %amendment.id,
                    change = amendment.request.kind(),
                    "amendment approved"
                );
                self.apply(&amendment.request);
            }
            BallotDecision::Rejected => {
                info!(
                    language = %self.name,
                    amendment = %amendment.id,
                    change = amendment.request.kind(),
                    "amendment rejected"
                );
            }
        }
        Some(amendment)
    }

    /// Apply an approved change against the current language state.
    ///
    /// References are resolved here, at apply time, not against a
    /// snapshot taken at proposal time: an amendment that targets a word
    /// or rule that changed underneath it applies against whatever is
    /// current. Targets that no longer resolve are logged no-ops —
    /// voting has already concluded and cannot be undone.
    pub fn apply(&mut self, request: &ChangeRequest) {
        match request {
            ChangeRequest::AddRule { text } => {
                self.rules.push(text.clone());
                self.rules_dirty = true;
            }
            ChangeRequest::EditRule { number, text } => {
                match self.rule_slot(*number) {
                    Some(slot) => {
                        *slot = text.clone();
                        self.rules_dirty = true;
                    }
                    None => {
                        debug!(language = %self.name, number, "edit_rule target out of bounds");
                    }
                }
            }
            ChangeRequest::RemoveRule { number } => {
                let index = number.wrapping_sub(1);
                if *number >= 1 && index < self.rules.len() {
                    self.rules.remove(index);
                    self.rules_dirty = true;
                } else {
                    debug!(language = %self.name, number, "remove_rule target out of bounds");
                }
            }
            ChangeRequest::RenameLanguage { name } => {
                self.name = name.clone();
                self.rules_dirty = true;
            }
            ChangeRequest::AddWord {
                text,
                pronunciation,
                definition,
                related,
            } => {
                // Duplicate word text is allowed: no uniqueness is
                // enforced on the dictionary.
                self.words
                    .push(Word::new(text, pronunciation, definition, related.clone()));
            }
            ChangeRequest::RemoveWord { text } => {
                match self.words.iter().position(|word| &word.text == text) {
                    Some(index) => {
                        self.words.remove(index);
                    }
                    None => {
                        debug!(language = %self.name, word = %text, "remove_word target absent");
                    }
                }
            }
            ChangeRequest::EditWord { text, field, value } => {
                match self.get_word_mut(text) {
                    Some(word) => {
                        match field {
                            WordField::Text => {
                                word.text = value.clone();
                                // A renamed word must not end up related
                                // to its own new key.
                                let own = word.text.clone();
                                word.related_words.retain(|key| key != &own);
                            }
                            WordField::Pronunciation => word.pronunciation = value.clone(),
                            WordField::Definition => word.definition = value.clone(),
                        }
                    }
                    None => {
                        debug!(language = %self.name, word = %text, "edit_word target absent");
                    }
                }
            }
            ChangeRequest::AddRelatedWord { text, related } => {
                if self.get_word(related).is_some() {
                    match self.get_word_mut(text) {
                        Some(word) => {
                            word.add_related(related);
                        }
                        None => {
                            debug!(language = %self.name, word = %text, "add_related_word target absent");
                        }
                    }
                } else {
                    debug!(language = %self.name, word = %related, "add_related_word reference absent");
                }
            }
            ChangeRequest::RemoveRelatedWord { text, related } => {
                if self.get_word(related).is_some() {
                    match self.get_word_mut(text) {
                        Some(word) => {
                            word.remove_related(related);
                        }
                        None => {
                            debug!(language = %self.name, word = %text, "remove_related_word target absent");
                        }
                    }
                } else {
                    debug!(language = %self.name, word = %related, "remove_related_word reference absent");
                }
            }
        }
    }

    /// Mutable access to a 1-indexed rule slot, or `None` out of bounds.
    fn rule_slot(&mut self, number: usize) -> Option<&mut String> {
        if number < 1 {
            return None;
        }
        self.rules.get_mut(number.wrapping_sub(1))
    }
}
