//! editor::session
//!
//! Editing session state: a schema forest plus the selector resolution and
//! outcome reporting the terminal surface needs.
//!
//! # Design
//!
//! The session is the adapter between typed editor commands and the forest's
//! mutation contract. It resolves user-supplied selectors to field ids,
//! supplies the parent scope for deletions (the forest API takes the scope
//! explicitly), and turns results into printable outcomes. It performs no
//! terminal I/O of its own; the CLI layer owns the loop and the printing.

use std::io::BufRead;

use thiserror::Error;

use crate::core::config::Config;
use crate::core::forest::{Field, ForestError, SchemaForest};
use crate::core::types::FieldId;
use crate::ui::render;

use super::command::{EditCommand, ParseError, HELP};

/// Errors from applying editor commands.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Forest(#[from] ForestError),

    #[error("no field matches '{0}'")]
    UnknownSelector(String),

    #[error("'{selector}' is ambiguous: {matches} fields match, use an id prefix")]
    AmbiguousSelector { selector: String, matches: usize },

    #[error("failed to render preview: {0}")]
    Render(#[from] serde_json::Error),
}

/// Errors from applying a whole edit script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {error}")]
    Command { line: usize, error: SessionError },
}

/// What applying one command produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The forest was mutated; the message summarizes the change
    Changed(String),
    /// A read-only command produced text to display
    Output(String),
    /// The session should end
    Quit,
}

/// An editing session over one schema forest.
pub struct Session {
    forest: SchemaForest,
    id_width: usize,
}

impl Session {
    /// Start a session on a fresh forest (seeded with `field1`).
    pub fn new(config: &Config) -> Self {
        Self {
            forest: SchemaForest::new(),
            id_width: config.id_width(),
        }
    }

    /// The forest being edited.
    pub fn forest(&self) -> &SchemaForest {
        &self.forest
    }

    /// Render the current field tree.
    pub fn tree(&self) -> String {
        render::tree(&self.forest, self.id_width)
    }

    /// Resolve a selector to a field id.
    ///
    /// A selector matches by id prefix first (the form the tree displays);
    /// if no id matches, by exact name. Duplicate names make a name selector
    /// ambiguous - ids are the unambiguous spelling.
    ///
    /// # Errors
    ///
    /// `UnknownSelector` if nothing matches, `AmbiguousSelector` if more
    /// than one field does.
    pub fn resolve(&self, selector: &str) -> Result<FieldId, SessionError> {
        let prefix = selector.to_ascii_lowercase();
        let id_matches: Vec<&FieldId> = self
            .forest
            .fields()
            .map(Field::id)
            .filter(|id| id.as_str().starts_with(&prefix))
            .collect();
        if id_matches.len() == 1 {
            return Ok(id_matches[0].clone());
        }

        let name_matches: Vec<&FieldId> = self
            .forest
            .fields()
            .filter(|field| field.name() == selector)
            .map(Field::id)
            .collect();
        if name_matches.len() == 1 {
            return Ok(name_matches[0].clone());
        }

        let matches = id_matches.len() + name_matches.len();
        if matches == 0 {
            Err(SessionError::UnknownSelector(selector.to_string()))
        } else {
            Err(SessionError::AmbiguousSelector {
                selector: selector.to_string(),
                matches,
            })
        }
    }

    /// Apply one command to the forest.
    ///
    /// # Errors
    ///
    /// Selector resolution and forest errors are returned unchanged; the
    /// forest is never left partially mutated.
    pub fn apply(&mut self, command: &EditCommand) -> Result<Outcome, SessionError> {
        match command {
            EditCommand::Add { parent } => {
                let parent_id = match parent {
                    Some(selector) => Some(self.resolve(selector)?),
                    None => None,
                };
                let id = self.forest.add_field(parent_id.as_ref())?;
                let message = match parent_id {
                    Some(parent_id) => format!(
                        "added [{}] {} under [{}]",
                        id.short(self.id_width),
                        SchemaForest::DEFAULT_FIELD_NAME,
                        parent_id.short(self.id_width),
                    ),
                    None => format!(
                        "added [{}] {}",
                        id.short(self.id_width),
                        SchemaForest::DEFAULT_FIELD_NAME,
                    ),
                };
                Ok(Outcome::Changed(message))
            }

            EditCommand::Rename { selector, name } => {
                let id = self.resolve(selector)?;
                self.forest.rename_field(&id, name.clone())?;
                Ok(Outcome::Changed(format!(
                    "renamed [{}] to '{}'",
                    id.short(self.id_width),
                    name
                )))
            }

            EditCommand::Retype { selector, kind } => {
                let id = self.resolve(selector)?;
                let dropped = if kind.is_nested() {
                    0
                } else {
                    self.forest.descendants(&id).len()
                };
                self.forest.retype_field(&id, *kind)?;
                let mut message =
                    format!("retyped [{}] to {}", id.short(self.id_width), kind);
                if dropped > 0 {
                    message.push_str(&format!(", dropping {dropped} nested field(s)"));
                }
                Ok(Outcome::Changed(message))
            }

            EditCommand::Delete { selector } => {
                let id = self.resolve(selector)?;
                let parent = self.forest.parent_of(&id).cloned();
                let dropped = self.forest.descendants(&id).len();
                let name = self
                    .forest
                    .get(&id)
                    .map(|field| field.name().to_string())
                    .unwrap_or_default();
                self.forest.delete_field(&id, parent.as_ref())?;
                let mut message =
                    format!("deleted [{}] {}", id.short(self.id_width), name);
                if dropped > 0 {
                    message.push_str(&format!(" and {dropped} nested field(s)"));
                }
                Ok(Outcome::Changed(message))
            }

            EditCommand::Tree => Ok(Outcome::Output(self.tree())),
            EditCommand::Preview => Ok(Outcome::Output(render::preview(&self.forest)?)),
            EditCommand::Help => Ok(Outcome::Output(HELP.to_string())),
            EditCommand::Quit => Ok(Outcome::Quit),
        }
    }

    /// Apply an edit script, one command per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. A `quit` command
    /// ends the script early. Unlike the interactive loop, scripts fail fast:
    /// the first error aborts with its line number.
    ///
    /// Returns the number of commands applied.
    ///
    /// # Errors
    ///
    /// `ScriptError::Io` for read failures, `ScriptError::Command` for the
    /// first parse or apply failure.
    pub fn run_script<R: BufRead>(&mut self, reader: R) -> Result<usize, ScriptError> {
        let mut applied = 0;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let command: EditCommand =
                trimmed.parse().map_err(|err: ParseError| ScriptError::Command {
                    line: index + 1,
                    error: err.into(),
                })?;
            let outcome = self.apply(&command).map_err(|error| ScriptError::Command {
                line: index + 1,
                error,
            })?;
            applied += 1;
            if outcome == Outcome::Quit {
                break;
            }
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldKind;

    fn session() -> Session {
        Session::new(&Config::default())
    }

    fn seed_id(session: &Session) -> FieldId {
        session.forest().roots()[0].clone()
    }

    mod resolve {
        use super::*;

        #[test]
        fn by_full_id() {
            let session = session();
            let id = seed_id(&session);
            assert_eq!(session.resolve(id.as_str()).unwrap(), id);
        }

        #[test]
        fn by_id_prefix() {
            let session = session();
            let id = seed_id(&session);
            assert_eq!(session.resolve(id.short(8)).unwrap(), id);
        }

        #[test]
        fn id_prefix_is_case_insensitive() {
            let session = session();
            let id = seed_id(&session);
            let upper = id.short(8).to_uppercase();
            assert_eq!(session.resolve(&upper).unwrap(), id);
        }

        #[test]
        fn by_exact_name() {
            let session = session();
            let id = seed_id(&session);
            assert_eq!(session.resolve("field1").unwrap(), id);
        }

        #[test]
        fn name_match_is_case_sensitive() {
            let session = session();
            assert!(matches!(
                session.resolve("FIELD1"),
                Err(SessionError::UnknownSelector(_))
            ));
        }

        #[test]
        fn unknown_selector() {
            let session = session();
            // 'z' never appears in an id, and no field has this name
            assert!(matches!(
                session.resolve("zzzz"),
                Err(SessionError::UnknownSelector(_))
            ));
        }

        #[test]
        fn duplicate_names_are_ambiguous() {
            let mut session = session();
            session
                .apply(&EditCommand::Add { parent: None })
                .unwrap();
            session
                .apply(&EditCommand::Add { parent: None })
                .unwrap();
            // both new fields are named "newField"
            assert!(matches!(
                session.resolve("newField"),
                Err(SessionError::AmbiguousSelector { matches: 2, .. })
            ));
        }
    }

    mod apply {
        use super::*;

        #[test]
        fn add_at_root() {
            let mut session = session();
            let outcome = session.apply(&EditCommand::Add { parent: None }).unwrap();
            assert!(matches!(outcome, Outcome::Changed(_)));
            assert_eq!(session.forest().roots().len(), 2);
        }

        #[test]
        fn add_under_nested_parent_by_name() {
            let mut session = session();
            session
                .apply(&EditCommand::Retype {
                    selector: "field1".to_string(),
                    kind: FieldKind::Nested,
                })
                .unwrap();
            session
                .apply(&EditCommand::Add {
                    parent: Some("field1".to_string()),
                })
                .unwrap();

            let parent = seed_id(&session);
            let children = session.forest().get(&parent).unwrap().children().unwrap();
            assert_eq!(children.len(), 1);
        }

        #[test]
        fn add_under_scalar_parent_fails() {
            let mut session = session();
            let err = session
                .apply(&EditCommand::Add {
                    parent: Some("field1".to_string()),
                })
                .unwrap_err();
            assert!(matches!(
                err,
                SessionError::Forest(ForestError::InvalidParent(_))
            ));
        }

        #[test]
        fn rename_reports_new_name() {
            let mut session = session();
            let outcome = session
                .apply(&EditCommand::Rename {
                    selector: "field1".to_string(),
                    name: "username".to_string(),
                })
                .unwrap();
            assert!(matches!(outcome, Outcome::Changed(message) if message.contains("username")));
        }

        #[test]
        fn retype_to_scalar_reports_dropped_descendants() {
            let mut session = session();
            session
                .apply(&EditCommand::Retype {
                    selector: "field1".to_string(),
                    kind: FieldKind::Nested,
                })
                .unwrap();
            session
                .apply(&EditCommand::Add {
                    parent: Some("field1".to_string()),
                })
                .unwrap();

            let outcome = session
                .apply(&EditCommand::Retype {
                    selector: "field1".to_string(),
                    kind: FieldKind::String,
                })
                .unwrap();
            assert!(
                matches!(outcome, Outcome::Changed(message) if message.contains("dropping 1"))
            );
            assert_eq!(session.forest().len(), 1);
        }

        #[test]
        fn delete_supplies_parent_scope() {
            let mut session = session();
            session
                .apply(&EditCommand::Retype {
                    selector: "field1".to_string(),
                    kind: FieldKind::Nested,
                })
                .unwrap();
            session
                .apply(&EditCommand::Add {
                    parent: Some("field1".to_string()),
                })
                .unwrap();

            session
                .apply(&EditCommand::Delete {
                    selector: "newField".to_string(),
                })
                .unwrap();

            let parent = seed_id(&session);
            assert_eq!(
                session.forest().get(&parent).unwrap().children(),
                Some(&[][..])
            );
        }

        #[test]
        fn quit_outcome() {
            let mut session = session();
            assert_eq!(session.apply(&EditCommand::Quit).unwrap(), Outcome::Quit);
        }

        #[test]
        fn preview_outputs_json() {
            let mut session = session();
            let outcome = session.apply(&EditCommand::Preview).unwrap();
            assert!(matches!(outcome, Outcome::Output(text) if text.contains("\"field1\": \"\"")));
        }
    }

    mod run_script {
        use super::*;

        #[test]
        fn builder_scenario() {
            let script = "\
# build the example schema
add
retype field1 nested
add field1
";
            let mut session = session();
            let applied = session.run_script(script.as_bytes()).unwrap();
            assert_eq!(applied, 3);
            assert_eq!(
                session.forest().serialize(),
                serde_json::json!({"field1": {"newField": ""}, "newField": ""})
            );
        }

        #[test]
        fn reports_failing_line_number() {
            let script = "add\n\nretype nosuch nested\n";
            let mut session = session();
            let err = session.run_script(script.as_bytes()).unwrap_err();
            assert!(matches!(err, ScriptError::Command { line: 3, .. }));
        }

        #[test]
        fn quit_stops_early() {
            let script = "add\nquit\nadd\n";
            let mut session = session();
            let applied = session.run_script(script.as_bytes()).unwrap();
            assert_eq!(applied, 2);
            assert_eq!(session.forest().roots().len(), 2);
        }

        #[test]
        fn parse_errors_fail_fast() {
            let script = "add\nexplode\n";
            let mut session = session();
            let err = session.run_script(script.as_bytes()).unwrap_err();
            assert!(matches!(
                err,
                ScriptError::Command {
                    line: 2,
                    error: SessionError::Parse(_)
                }
            ));
        }
    }
}
