//! Token-list validation into a typed [`Command`].
//!
//! Nine command shapes feed the amendment pipeline; two reserved commands
//! bypass it (`createlanguage` mutates immediately, `dictionary` is a
//! pure read). Anything else is dropped as unrecognized.

use glossa_types::{ChangeRequest, WordField};

use crate::error::{CommandError, ParseError};
use crate::tokenize::tokenize;

/// A validated community command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a language in the origin channel. Immediate, no vote.
    CreateLanguage {
        /// The language's initial name.
        name: String,
    },
    /// Export the language as a text file to the requester. Pure read.
    Dictionary,
    /// Every other command: a change request submitted for a vote.
    Amend(ChangeRequest),
}

impl Command {
    /// Validate a token list against the known command shapes.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when the name or arity matches nothing,
    /// when a rule number fails integer parsing, or when an `editword`
    /// field name is outside the allowed set. No amendment is created on
    /// any failure path.
    pub fn from_tokens(tokens: &[String]) -> Result<Self, CommandError> {
        let Some((name, args)) = tokens.split_first() else {
            return Err(CommandError::UnrecognizedCommand {
                name: String::new(),
                args: 0,
            });
        };

        match (name.as_str(), args) {
            ("createlanguage", [language_name]) => Ok(Self::CreateLanguage {
                name: language_name.clone(),
            }),
            ("dictionary", []) => Ok(Self::Dictionary),
            ("addrule", [text]) => Ok(Self::Amend(ChangeRequest::AddRule {
                text: text.clone(),
            })),
            ("editrule", [number, text]) => Ok(Self::Amend(ChangeRequest::EditRule {
                number: parse_rule_number(number)?,
                text: text.clone(),
            })),
            ("removerule", [number]) => Ok(Self::Amend(ChangeRequest::RemoveRule {
                number: parse_rule_number(number)?,
            })),
            ("changename", [new_name]) => Ok(Self::Amend(ChangeRequest::RenameLanguage {
                name: new_name.clone(),
            })),
            ("addword", [text, pronunciation, definition, related @ ..]) => {
                Ok(Self::Amend(ChangeRequest::AddWord {
                    text: text.clone(),
                    pronunciation: pronunciation.clone(),
                    definition: definition.clone(),
                    related: related.to_vec(),
                }))
            }
            ("removeword", [text]) => Ok(Self::Amend(ChangeRequest::RemoveWord {
                text: text.clone(),
            })),
            ("editword", [text, field, value]) => {
                let field = WordField::parse(field).ok_or_else(|| {
                    CommandError::InvalidWordField { raw: field.clone() }
                })?;
                Ok(Self::Amend(ChangeRequest::EditWord {
                    text: text.clone(),
                    field,
                    value: value.clone(),
                }))
            }
            ("addrelatedword", [text, related]) => {
                Ok(Self::Amend(ChangeRequest::AddRelatedWord {
                    text: text.clone(),
                    related: related.clone(),
                }))
            }
            ("removerelatedword", [text, related]) => {
                Ok(Self::Amend(ChangeRequest::RemoveRelatedWord {
                    text: text.clone(),
                    related: related.clone(),
                }))
            }
            _ => Err(CommandError::UnrecognizedCommand {
                name: name.clone(),
                args: args.len(),
            }),
        }
    }
}

/// Parse raw command text (sigil already stripped) into a [`Command`].
///
/// # Errors
///
/// Returns [`ParseError`] if tokenization or validation fails. The
/// caller logs and drops; nothing is surfaced to the channel.
pub fn parse_command(raw: &str) -> Result<Command, ParseError> {
    let tokens = tokenize(raw)?;
    Ok(Command::from_tokens(&tokens)?)
}

/// Parse a 1-indexed rule number argument.
///
/// Zero parses successfully; the apply-time bounds check turns it into a
/// no-op. Negative values and non-numeric text are rejected here.
fn parse_rule_number(raw: &str) -> Result<usize, CommandError> {
    raw.trim()
        .parse()
        .ok()
        .ok_or_else(|| CommandError::InvalidNumericArgument { raw: raw.to_owned() })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn owned(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| (*t).to_owned()).collect()
    }

    #[test]
    fn createlanguage_requires_exactly_one_argument() {
        let command = Command::from_tokens(&owned(&["createlanguage", "Auri"])).unwrap();
        assert_eq!(
            command,
            Command::CreateLanguage {
                name: "Auri".to_owned()
            }
        );
        assert!(matches!(
            Command::from_tokens(&owned(&["createlanguage"])),
            Err(CommandError::UnrecognizedCommand { .. })
        ));
    }

    #[test]
    fn dictionary_takes_no_arguments() {
        assert_eq!(
            Command::from_tokens(&owned(&["dictionary"])).unwrap(),
            Command::Dictionary
        );
        assert!(Command::from_tokens(&owned(&["dictionary", "extra"])).is_err());
    }

    #[test]
    fn addword_accepts_trailing_related_words() {
        let command =
            Command::from_tokens(&owned(&["addword", "sol", "soh-l", "the sun", "lun", "ster"]))
                .unwrap();
        assert_eq!(
            command,
            Command::Amend(ChangeRequest::AddWord {
                text: "sol".to_owned(),
                pronunciation: "soh-l".to_owned(),
                definition: "the sun".to_owned(),
                related: vec!["lun".to_owned(), "ster".to_owned()],
            })
        );
    }

    #[test]
    fn addword_rejects_too_few_arguments() {
        assert!(matches!(
            Command::from_tokens(&owned(&["addword", "sol", "soh-l"])),
            Err(CommandError::UnrecognizedCommand { ref name, args: 2 }) if name == "addword"
        ));
    }

    #[test]
    fn editrule_rejects_non_numeric_rule_number() {
        assert!(matches!(
            Command::from_tokens(&owned(&["editrule", "first", "new text"])),
            Err(CommandError::InvalidNumericArgument { ref raw }) if raw == "first"
        ));
    }

    #[test]
    fn removerule_rejects_negative_rule_number() {
        assert!(matches!(
            Command::from_tokens(&owned(&["removerule", "-1"])),
            Err(CommandError::InvalidNumericArgument { .. })
        ));
    }

    #[test]
    fn rule_number_zero_parses_and_defers_to_apply_bounds() {
        let command = Command::from_tokens(&owned(&["removerule", "0"])).unwrap();
        assert_eq!(command, Command::Amend(ChangeRequest::RemoveRule { number: 0 }));
    }

    #[test]
    fn editword_lowercases_field_name() {
        let command =
            Command::from_tokens(&owned(&["editword", "sol", "Definition", "a star"])).unwrap();
        assert_eq!(
            command,
            Command::Amend(ChangeRequest::EditWord {
                text: "sol".to_owned(),
                field: WordField::Definition,
                value: "a star".to_owned(),
            })
        );
    }

    #[test]
    fn editword_rejects_unknown_field() {
        assert!(matches!(
            Command::from_tokens(&owned(&["editword", "sol", "etymology", "x"])),
            Err(CommandError::InvalidWordField { ref raw }) if raw == "etymology"
        ));
    }

    #[test]
    fn unknown_command_name_is_unrecognized() {
        assert!(matches!(
            Command::from_tokens(&owned(&["deleteeverything", "now"])),
            Err(CommandError::UnrecognizedCommand { ref name, args: 1 }) if name == "deleteeverything"
        ));
    }

    #[test]
    fn parse_command_covers_the_full_path() {
        let command = parse_command("addrelatedword \"sol\" \"lun\"").unwrap();
        assert_eq!(
            command,
            Command::Amend(ChangeRequest::AddRelatedWord {
                text: "sol".to_owned(),
                related: "lun".to_owned(),
            })
        );
        assert!(parse_command("addrule \"unterminated").is_err());
    }
}
