//! Line-oriented action scripts for driving a checklist without the
//! terminal panel.
//!
//! ```text
//! # comment
//! add Run integration tests
//! toggle 2
//! priority 2 high
//! assign 2 ana
//! due 2 +3d
//! text 2 Run the full integration suite
//! remove 1
//! ```

use std::fmt;

use tracing::{debug, info};

use crate::lookup::{DateParseError, DatePicker, UserDirectory};
use crate::model::item::{Field, FieldValue, ItemId, ParsePriorityError, Priority};
use crate::ops::edit::EditController;
use crate::ops::store::{ItemStore, StoreError};

/// A single parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(String),
    Toggle(ItemId),
    Remove(ItemId),
    Text(ItemId, String),
    Priority(ItemId, Priority),
    Assign(ItemId, String),
    Unassign(ItemId),
    /// Date expression, resolved by the date picker when applied
    Due(ItemId, String),
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown action '{action}'")]
    UnknownAction { line: usize, action: String },
    #[error("line {line}: {action} expects {expected}")]
    MissingArgument {
        line: usize,
        action: &'static str,
        expected: &'static str,
    },
    #[error("line {line}: invalid item id '{value}'")]
    InvalidId { line: usize, value: String },
    #[error("line {line}: {source}")]
    Priority {
        line: usize,
        source: ParsePriorityError,
    },
    #[error("line {line}: unknown user '{id}'")]
    UnknownUser { line: usize, id: String },
    #[error("line {line}: {source}")]
    Date { line: usize, source: DateParseError },
}

/// A rejected action. The script keeps running after one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptWarning {
    pub line: usize,
    pub error: StoreError,
}

impl fmt::Display for ScriptWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// Parse a script into `(line number, action)` pairs. Blank lines and
/// `#` comments are skipped.
pub fn parse_script(src: &str) -> Result<Vec<(usize, Action)>, ScriptError> {
    let mut actions = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        actions.push((line, parse_line(line, trimmed)?));
    }
    Ok(actions)
}

fn parse_line(line: usize, s: &str) -> Result<Action, ScriptError> {
    let (verb, rest) = split_word(s);
    let action = match verb {
        "add" => Action::Add(rest.to_string()),
        "toggle" => Action::Toggle(parse_id(line, "toggle", rest)?.0),
        "remove" => Action::Remove(parse_id(line, "remove", rest)?.0),
        "unassign" => Action::Unassign(parse_id(line, "unassign", rest)?.0),
        "text" => {
            let (id, text) = parse_id(line, "text", rest)?;
            Action::Text(id, text.to_string())
        }
        "priority" => {
            let (id, tier) = parse_id(line, "priority", rest)?;
            let tier = require(line, "priority", "an id and a tier", tier)?;
            let priority = tier
                .parse()
                .map_err(|source| ScriptError::Priority { line, source })?;
            Action::Priority(id, priority)
        }
        "assign" => {
            let (id, user) = parse_id(line, "assign", rest)?;
            let user = require(line, "assign", "an id and a user id", user)?;
            Action::Assign(id, user.to_string())
        }
        "due" => {
            let (id, expr) = parse_id(line, "due", rest)?;
            Action::Due(id, expr.to_string())
        }
        other => {
            return Err(ScriptError::UnknownAction {
                line,
                action: other.to_string(),
            });
        }
    };
    Ok(action)
}

/// Split off the first whitespace-delimited word
fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn parse_id<'a>(
    line: usize,
    action: &'static str,
    rest: &'a str,
) -> Result<(ItemId, &'a str), ScriptError> {
    let (word, rest) = split_word(rest);
    let word = require(line, action, "an item id", word)?;
    let id = word.parse().map_err(|_| ScriptError::InvalidId {
        line,
        value: word.to_string(),
    })?;
    Ok((id, rest))
}

fn require<'a>(
    line: usize,
    action: &'static str,
    expected: &'static str,
    value: &'a str,
) -> Result<&'a str, ScriptError> {
    if value.is_empty() {
        Err(ScriptError::MissingArgument {
            line,
            action,
            expected,
        })
    } else {
        Ok(value)
    }
}

/// Run parsed actions against a store, in order.
///
/// Edits go through the edit controller the same way the terminal panel
/// drives them: text is drafted then confirmed (or cancelled when rejected),
/// picker fields are opened then selected.
pub fn apply_script(
    store: &mut ItemStore,
    edits: &mut EditController,
    actions: &[(usize, Action)],
    directory: &dyn UserDirectory,
    dates: &dyn DatePicker,
) -> Result<Vec<ScriptWarning>, ScriptError> {
    let mut warnings = Vec::new();
    for (line, action) in actions {
        let line = *line;
        debug!(line, ?action, "applying action");
        let result = match action {
            Action::Add(text) => store.add(text).map(|_| ()),
            Action::Toggle(id) => store.toggle(*id).map(|_| ()),
            Action::Remove(id) => edits
                .remove(store, *id)
                .map(|_| ())
                .ok_or(StoreError::NotFound(*id)),
            Action::Text(id, text) => {
                if !store.contains(*id) {
                    Err(StoreError::NotFound(*id))
                } else {
                    edits.begin_text(store, *id);
                    edits.update_draft(*id, text.as_str());
                    let result = edits.confirm_text(store, *id);
                    if result.is_err() {
                        edits.cancel_text(store, *id);
                    }
                    result
                }
            }
            Action::Priority(id, p) => pick(store, edits, *id, FieldValue::Priority(*p)),
            Action::Assign(id, user_id) => {
                let user = directory
                    .resolve(user_id)
                    .ok_or_else(|| ScriptError::UnknownUser {
                        line,
                        id: user_id.clone(),
                    })?;
                pick(store, edits, *id, FieldValue::Assignee(Some(user)))
            }
            Action::Unassign(id) => pick(store, edits, *id, FieldValue::Assignee(None)),
            Action::Due(id, expr) => {
                let choice = dates
                    .resolve(expr)
                    .map_err(|source| ScriptError::Date { line, source })?;
                pick(store, edits, *id, FieldValue::DueDate(choice.into_option()))
            }
        };
        if let Err(error) = result {
            warnings.push(ScriptWarning { line, error });
        }
    }
    info!(
        actions = actions.len(),
        warnings = warnings.len(),
        "script applied"
    );
    Ok(warnings)
}

fn pick(
    store: &mut ItemStore,
    edits: &mut EditController,
    id: ItemId,
    value: FieldValue,
) -> Result<(), StoreError> {
    let field: Field = value.field();
    edits.open_field(store, id, field);
    edits.select(store, id, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{StaticDirectory, TextDatePicker};
    use crate::model::item::UserRef;
    use chrono::NaiveDate;

    fn run(store: &mut ItemStore, src: &str) -> Result<Vec<ScriptWarning>, ScriptError> {
        let directory = StaticDirectory::new(vec![UserRef::new("ana", "Ana Lima")]);
        let dates = TextDatePicker::new(NaiveDate::from_ymd_opt(2025, 5, 30).unwrap());
        let actions = parse_script(src)?;
        let mut edits = EditController::new();
        apply_script(store, &mut edits, &actions, &directory, &dates)
    }

    #[test]
    fn test_parse_all_actions() {
        let actions = parse_script(
            "\
# setup
add Run tests

toggle 1
remove 2
text 1 New   text
priority 1 HIGH
assign 1 ana
unassign 1
due 1 +3d
due 1
",
        )
        .unwrap();
        let expected = vec![
            (2, Action::Add("Run tests".into())),
            (4, Action::Toggle(ItemId(1))),
            (5, Action::Remove(ItemId(2))),
            (6, Action::Text(ItemId(1), "New   text".into())),
            (7, Action::Priority(ItemId(1), Priority::High)),
            (8, Action::Assign(ItemId(1), "ana".into())),
            (9, Action::Unassign(ItemId(1))),
            (10, Action::Due(ItemId(1), "+3d".into())),
            (11, Action::Due(ItemId(1), String::new())),
        ];
        assert_eq!(actions, expected);
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let err = parse_script("add a\nfrobnicate 1").unwrap_err();
        assert_eq!(err.to_string(), "line 2: unknown action 'frobnicate'");

        let err = parse_script("toggle x").unwrap_err();
        assert_eq!(err.to_string(), "line 1: invalid item id 'x'");

        let err = parse_script("\n\npriority 1 urgent").unwrap_err();
        assert!(matches!(err, ScriptError::Priority { line: 3, .. }));

        let err = parse_script("assign 1").unwrap_err();
        assert_eq!(err.to_string(), "line 1: assign expects an id and a user id");

        let err = parse_script("remove").unwrap_err();
        assert_eq!(err.to_string(), "line 1: remove expects an item id");
    }

    #[test]
    fn test_apply_script() {
        let mut store = ItemStore::new();
        let warnings = run(
            &mut store,
            "add Verify staging\nadd Run tests\ntoggle 1\npriority 2 high\nassign 2 ana\ndue 2 tomorrow\ntext 2  Run all tests ",
        )
        .unwrap();
        assert!(warnings.is_empty());

        let item = store.get(ItemId(2)).unwrap();
        assert_eq!(item.text, "Run all tests");
        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.assignee.as_ref().unwrap().id, "ana");
        assert_eq!(item.due_date, NaiveDate::from_ymd_opt(2025, 5, 31));
        assert_eq!(store.progress(), 0.5);
    }

    #[test]
    fn test_rejections_become_warnings() {
        let mut store = ItemStore::new();
        let warnings = run(&mut store, "add \nadd Real\ntext 1   \ntoggle 9\nremove 9").unwrap();
        assert_eq!(
            warnings,
            vec![
                ScriptWarning {
                    line: 1,
                    error: StoreError::EmptyText
                },
                ScriptWarning {
                    line: 3,
                    error: StoreError::EmptyText
                },
                ScriptWarning {
                    line: 4,
                    error: StoreError::NotFound(ItemId(9))
                },
                ScriptWarning {
                    line: 5,
                    error: StoreError::NotFound(ItemId(9))
                },
            ]
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(ItemId(1)).unwrap().text, "Real");
        assert_eq!(warnings[0].to_string(), "line 1: text cannot be empty");
    }

    #[test]
    fn test_unknown_user_is_an_error() {
        let mut store = ItemStore::new();
        let err = run(&mut store, "add a\nassign 1 zed").unwrap_err();
        assert_eq!(err.to_string(), "line 2: unknown user 'zed'");
    }

    #[test]
    fn test_bad_date_is_an_error() {
        let mut store = ItemStore::new();
        let err = run(&mut store, "add a\ndue 1 someday").unwrap_err();
        assert!(matches!(err, ScriptError::Date { line: 2, .. }));
    }

    #[test]
    fn test_due_without_expression_clears() {
        let mut store = ItemStore::new();
        run(&mut store, "add a\ndue 1 today\ndue 1").unwrap();
        assert_eq!(store.get(ItemId(1)).unwrap().due_date, None);
    }
}
