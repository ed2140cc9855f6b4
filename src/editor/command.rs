//! editor::command
//!
//! Line grammar for editor commands.
//!
//! One command per line, verb first. Fields are addressed by a selector:
//! an id prefix (as shown in the tree) or an exact field name. The rename
//! verb takes the rest of the line as the new name, verbatim - duplicate
//! and oddly shaped names are accepted and show up as-is in the preview.

use thiserror::Error;

use crate::core::types::{FieldKind, TypeError};

/// Help text shown by the `help` command.
pub const HELP: &str = "\
commands:
  add [parent]         add a field at the root, or under a nested field
  rename <field> <name>  set a field's name (rest of line, verbatim)
  retype <field> <kind>  set a field's kind: string, number, or nested
  delete <field>       remove a field and everything beneath it
  tree                 show the field tree          (alias: ls)
  preview              show the serialized schema   (alias: json)
  help                 show this help               (alias: ?)
  quit                 end the session              (aliases: exit, q)

fields are addressed by id prefix (shown in the tree) or exact name.
retyping a nested field to a scalar kind deletes all fields beneath it.";

/// Errors from command parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', try 'help'")]
    UnknownCommand(String),

    #[error("'{command}' requires {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("unexpected argument '{argument}' to '{command}'")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },

    #[error(transparent)]
    InvalidKind(#[from] TypeError),
}

/// A single parsed editor command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Add a field at the root, or under the selected nested field
    Add { parent: Option<String> },
    /// Set the selected field's name
    Rename { selector: String, name: String },
    /// Set the selected field's kind
    Retype { selector: String, kind: FieldKind },
    /// Remove the selected field and its subtree
    Delete { selector: String },
    /// Show the field tree
    Tree,
    /// Show the serialized schema
    Preview,
    /// Show help
    Help,
    /// End the session
    Quit,
}

impl EditCommand {
    /// Require that a command received no trailing arguments.
    fn no_args(command: &'static str, rest: &str) -> Result<(), ParseError> {
        if rest.is_empty() {
            Ok(())
        } else {
            Err(ParseError::UnexpectedArgument {
                command,
                argument: rest.to_string(),
            })
        }
    }

    /// Require a single-token argument.
    fn one_arg(
        command: &'static str,
        what: &'static str,
        rest: &str,
    ) -> Result<String, ParseError> {
        if rest.is_empty() {
            return Err(ParseError::MissingArgument { command, what });
        }
        match rest.split_once(char::is_whitespace) {
            None => Ok(rest.to_string()),
            Some((_, extra)) => Err(ParseError::UnexpectedArgument {
                command,
                argument: extra.trim_start().to_string(),
            }),
        }
    }
}

impl std::str::FromStr for EditCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::Empty);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim_start()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "add" | "a" => {
                if rest.is_empty() {
                    Ok(EditCommand::Add { parent: None })
                } else {
                    let parent = Self::one_arg("add", "at most one parent field", rest)?;
                    Ok(EditCommand::Add {
                        parent: Some(parent),
                    })
                }
            }
            "rename" => match rest.split_once(char::is_whitespace) {
                Some((selector, name)) => Ok(EditCommand::Rename {
                    selector: selector.to_string(),
                    name: name.trim_start().to_string(),
                }),
                None => Err(ParseError::MissingArgument {
                    command: "rename",
                    what: "a field and a new name",
                }),
            },
            "retype" => match rest.split_once(char::is_whitespace) {
                Some((selector, kind)) => {
                    let kind = Self::one_arg("retype", "a field and a kind", kind.trim_start())?;
                    Ok(EditCommand::Retype {
                        selector: selector.to_string(),
                        kind: kind.parse()?,
                    })
                }
                None => Err(ParseError::MissingArgument {
                    command: "retype",
                    what: "a field and a kind",
                }),
            },
            "delete" | "rm" => {
                let selector = Self::one_arg("delete", "a field", rest)?;
                Ok(EditCommand::Delete { selector })
            }
            "tree" | "ls" => {
                Self::no_args("tree", rest)?;
                Ok(EditCommand::Tree)
            }
            "preview" | "json" => {
                Self::no_args("preview", rest)?;
                Ok(EditCommand::Preview)
            }
            "help" | "?" => {
                Self::no_args("help", rest)?;
                Ok(EditCommand::Help)
            }
            "quit" | "exit" | "q" => {
                Self::no_args("quit", rest)?;
                Ok(EditCommand::Quit)
            }
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<EditCommand, ParseError> {
        line.parse()
    }

    #[test]
    fn add_without_parent() {
        assert_eq!(parse("add").unwrap(), EditCommand::Add { parent: None });
        assert_eq!(parse("a").unwrap(), EditCommand::Add { parent: None });
    }

    #[test]
    fn add_with_parent() {
        assert_eq!(
            parse("add field1").unwrap(),
            EditCommand::Add {
                parent: Some("field1".to_string())
            }
        );
    }

    #[test]
    fn add_with_two_parents_rejected() {
        assert!(matches!(
            parse("add one two"),
            Err(ParseError::UnexpectedArgument { .. })
        ));
    }

    #[test]
    fn rename_takes_rest_of_line() {
        assert_eq!(
            parse("rename 3f2a full name with spaces").unwrap(),
            EditCommand::Rename {
                selector: "3f2a".to_string(),
                name: "full name with spaces".to_string(),
            }
        );
    }

    #[test]
    fn rename_requires_name() {
        assert!(matches!(
            parse("rename 3f2a"),
            Err(ParseError::MissingArgument { .. })
        ));
        assert!(matches!(
            parse("rename"),
            Err(ParseError::MissingArgument { .. })
        ));
    }

    #[test]
    fn retype_parses_kind() {
        assert_eq!(
            parse("retype 3f2a nested").unwrap(),
            EditCommand::Retype {
                selector: "3f2a".to_string(),
                kind: FieldKind::Nested,
            }
        );
        assert_eq!(
            parse("retype 3f2a NUMBER").unwrap(),
            EditCommand::Retype {
                selector: "3f2a".to_string(),
                kind: FieldKind::Number,
            }
        );
    }

    #[test]
    fn retype_rejects_unknown_kind() {
        assert!(matches!(
            parse("retype 3f2a boolean"),
            Err(ParseError::InvalidKind(_))
        ));
    }

    #[test]
    fn retype_requires_both_arguments() {
        assert!(matches!(
            parse("retype 3f2a"),
            Err(ParseError::MissingArgument { .. })
        ));
    }

    #[test]
    fn delete_takes_one_selector() {
        assert_eq!(
            parse("delete 3f2a").unwrap(),
            EditCommand::Delete {
                selector: "3f2a".to_string()
            }
        );
        assert_eq!(
            parse("rm 3f2a").unwrap(),
            EditCommand::Delete {
                selector: "3f2a".to_string()
            }
        );
        assert!(matches!(
            parse("delete"),
            Err(ParseError::MissingArgument { .. })
        ));
    }

    #[test]
    fn bare_commands_and_aliases() {
        assert_eq!(parse("tree").unwrap(), EditCommand::Tree);
        assert_eq!(parse("ls").unwrap(), EditCommand::Tree);
        assert_eq!(parse("preview").unwrap(), EditCommand::Preview);
        assert_eq!(parse("json").unwrap(), EditCommand::Preview);
        assert_eq!(parse("help").unwrap(), EditCommand::Help);
        assert_eq!(parse("?").unwrap(), EditCommand::Help);
        assert_eq!(parse("quit").unwrap(), EditCommand::Quit);
        assert_eq!(parse("exit").unwrap(), EditCommand::Quit);
        assert_eq!(parse("q").unwrap(), EditCommand::Quit);
    }

    #[test]
    fn bare_commands_reject_arguments() {
        assert!(matches!(
            parse("tree please"),
            Err(ParseError::UnexpectedArgument { .. })
        ));
        assert!(matches!(
            parse("quit now"),
            Err(ParseError::UnexpectedArgument { .. })
        ));
    }

    #[test]
    fn verbs_are_case_insensitive() {
        assert_eq!(parse("ADD").unwrap(), EditCommand::Add { parent: None });
        assert_eq!(parse("Tree").unwrap(), EditCommand::Tree);
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(parse("   ").unwrap_err(), ParseError::Empty);
        assert_eq!(parse("").unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn unknown_verb() {
        assert_eq!(
            parse("explode").unwrap_err(),
            ParseError::UnknownCommand("explode".to_string())
        );
    }
}
