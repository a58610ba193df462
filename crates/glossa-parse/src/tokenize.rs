//! The command tokenizer: raw text to an ordered token list.
//!
//! Commands arrive as free-form chat text such as
//! `addword "sol" "soh-l" "the sun"`. The first token is the command
//! name; every quoted span after it is one argument. Text between a
//! closing quote and the next opening quote is insignificant separator
//! noise and produces no token.

use crate::error::TokenizeError;

/// Split raw command text into a command name plus quoted arguments.
///
/// An input with no double quote at all is a valid one-token result: the
/// whole input is the bare command name. Otherwise everything before the
/// first quote, with all whitespace removed, is the command name, and the
/// remainder is consumed quote pair by quote pair.
///
/// # Errors
///
/// Returns [`TokenizeError`] when quoting is unbalanced — an opening
/// quote with no closing quote cannot be consumed without stalling, so
/// the whole submission is dropped. The function terminates on every
/// input, including odd quote counts.
pub fn tokenize(raw: &str) -> Result<Vec<String>, TokenizeError> {
    let Some(first_quote) = raw.find('"') else {
        return Ok(vec![raw.to_owned()]);
    };

    // Command names never contain whitespace, so strip all of it.
    let head = raw.get(..first_quote).unwrap_or_default();
    let name: String = head.split_whitespace().collect();
    let mut tokens = vec![name];

    // `rest` always begins at an opening quote.
    let mut rest = raw.get(first_quote..).unwrap_or_default();
    while !rest.is_empty() {
        let before = rest;
        let body = rest.get(1..).unwrap_or_default();
        let Some(end) = body.find('"') else {
            return Err(TokenizeError);
        };
        tokens.push(body.get(..end).unwrap_or_default().to_owned());

        let after = body.get(end.saturating_add(1)..).unwrap_or_default();
        rest = match after.find('"') {
            Some(next) => after.get(next..).unwrap_or_default(),
            None => "",
        };
        // Stalled extraction means the quoting cannot be consumed.
        if before == rest {
            return Err(TokenizeError);
        }
    }

    Ok(tokens)
}
