//! Outbound text rendering: ballots, rules summaries, dictionary export.
//!
//! Pure functions from state to text. The ballot always carries the live
//! remaining-time count on its first line; the reconciliation pass
//! re-renders the whole ballot each tick so that line stays current.

use std::fmt::Write as _;

use glossa_lang::Language;
use glossa_types::ChangeRequest;

/// Render a ballot for a change request with the given remaining time.
pub fn ballot_text(request: &ChangeRequest, remaining_secs: i64) -> String {
    let mut out = format!("Time Remaining: {remaining_secs}\n");
    match request {
        ChangeRequest::AddRule { text } => {
            let _ = write!(out, "Change:\nAdd Rule: {text}");
        }
        ChangeRequest::EditRule { number, text } => {
            let _ = write!(out, "Change:\nChange rule {number} to \"{text}\"");
        }
        ChangeRequest::RemoveRule { number } => {
            let _ = write!(out, "Change:\nRemove Rule {number}");
        }
        ChangeRequest::RenameLanguage { name } => {
            let _ = write!(out, "Change:\nChange language name to \"{name}\"");
        }
        ChangeRequest::AddWord {
            text,
            pronunciation,
            definition,
            related,
        } => {
            let _ = write!(
                out,
                "Change: Add Word\nText: {text}\nPronunciation: {pronunciation}\nDefinition: {definition}\nRelated Words: {related}",
                related = related.join(", ")
            );
        }
        ChangeRequest::RemoveWord { text } => {
            let _ = write!(out, "Change:\nRemove Word: {text}");
        }
        ChangeRequest::EditWord { text, field, value } => {
            let _ = write!(out, "Change:\nChange \"{text}\"'s {field} to {value}");
        }
        ChangeRequest::AddRelatedWord { text, related } => {
            let _ = write!(
                out,
                "Change:\nAdd \"{related}\" as a related word to \"{text}\""
            );
        }
        ChangeRequest::RemoveRelatedWord { text, related } => {
            let _ = write!(
                out,
                "Change:\nRemove \"{related}\" as a related word to \"{text}\""
            );
        }
    }
    out
}

/// Render the pinned rules-summary message for a language.
pub fn rules_summary(language: &Language) -> String {
    let mut out = format!("Language: {}\nRules:\n", language.name);
    for (number, rule) in (1_usize..).zip(&language.rules) {
        let _ = writeln!(out, "{number}: {rule}");
    }
    out
}

/// Render the full dictionary export delivered as a text file.
pub fn dictionary_export(language: &Language) -> String {
    let mut out = format!("{}\nRules:\n", language.name);
    for (number, rule) in (1_usize..).zip(&language.rules) {
        let _ = writeln!(out, "{number}: {rule}");
    }
    out.push_str("--------------------------\nWords:\n");
    for word in &language.words {
        let _ = writeln!(
            out,
            "{}\nPronunciation: {}\nDefinition: {}\nRelated Words: {}\n",
            word.text,
            word.pronunciation,
            word.definition,
            word.related_words.join(", ")
        );
    }
    out
}
