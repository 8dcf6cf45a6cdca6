use crossterm::event::{KeyCode, KeyEvent};

use crate::model::{FieldValue, Priority};
use crate::tui::app::{App, Mode, PickerState};

use super::edit::edit_line;

pub(super) fn handle_picker(app: &mut App, key: KeyEvent) {
    let Some(picker) = app.picker.take() else {
        app.mode = Mode::Navigate;
        return;
    };
    let id = picker.item_id();

    if key.code == KeyCode::Esc {
        app.edits.dismiss_field(id);
        close_picker(app);
        return;
    }

    let next = match picker {
        PickerState::Priority { id, cursor } => handle_priority(app, id, cursor, key),
        PickerState::Assignee { id, query, cursor } => handle_assignee(app, id, query, cursor, key),
        PickerState::Date { id, input } => handle_date(app, id, input, key),
    };
    match next {
        Some(state) => app.picker = Some(state),
        None => close_picker(app),
    }
}

fn close_picker(app: &mut App) {
    app.picker = None;
    app.edit_cursor = 0;
    app.mode = Mode::Navigate;
}

/// Commit a picked value. The picker closes either way: a missing item
/// has nothing left to edit.
fn commit(app: &mut App, id: crate::model::ItemId, value: FieldValue) {
    let _ = app.edits.select(&mut app.store, id, value);
}

fn handle_priority(
    app: &mut App,
    id: crate::model::ItemId,
    cursor: usize,
    key: KeyEvent,
) -> Option<PickerState> {
    let last = Priority::ALL.len() - 1;
    let chosen = match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            return Some(PickerState::Priority {
                id,
                cursor: (cursor + 1).min(last),
            });
        }
        KeyCode::Char('k') | KeyCode::Up => {
            return Some(PickerState::Priority {
                id,
                cursor: cursor.saturating_sub(1),
            });
        }
        KeyCode::Enter => Priority::ALL[cursor.min(last)],
        KeyCode::Char('l') | KeyCode::Char('1') => Priority::Low,
        KeyCode::Char('m') | KeyCode::Char('2') => Priority::Medium,
        KeyCode::Char('h') | KeyCode::Char('3') => Priority::High,
        _ => return Some(PickerState::Priority { id, cursor }),
    };
    commit(app, id, FieldValue::Priority(chosen));
    None
}

fn handle_assignee(
    app: &mut App,
    id: crate::model::ItemId,
    mut query: String,
    cursor: usize,
    key: KeyEvent,
) -> Option<PickerState> {
    let results = app.directory.search(&query);
    match key.code {
        KeyCode::Down => Some(PickerState::Assignee {
            id,
            query,
            cursor: (cursor + 1).min(results.len()),
        }),
        KeyCode::Up => Some(PickerState::Assignee {
            id,
            query,
            cursor: cursor.saturating_sub(1),
        }),
        KeyCode::Enter => {
            let user = match cursor {
                0 => None,
                n => match results.get(n - 1) {
                    Some(u) => Some(u.clone()),
                    None => {
                        app.status_message = Some("no matching user".to_string());
                        return Some(PickerState::Assignee { id, query, cursor });
                    }
                },
            };
            commit(app, id, FieldValue::Assignee(user));
            None
        }
        _ => {
            let before = query.clone();
            edit_line(&mut query, &mut app.edit_cursor, key);
            // Typing jumps to the first match
            let cursor = if query == before {
                cursor
            } else if query.trim().is_empty() || app.directory.search(&query).is_empty() {
                0
            } else {
                1
            };
            Some(PickerState::Assignee { id, query, cursor })
        }
    }
}

fn handle_date(
    app: &mut App,
    id: crate::model::ItemId,
    mut input: String,
    key: KeyEvent,
) -> Option<PickerState> {
    if key.code == KeyCode::Enter {
        return match app.dates.resolve(&input) {
            Ok(choice) => {
                commit(app, id, FieldValue::DueDate(choice.into_option()));
                None
            }
            Err(e) => {
                app.status_message = Some(e.to_string());
                Some(PickerState::Date { id, input })
            }
        };
    }
    edit_line(&mut input, &mut app.edit_cursor, key);
    Some(PickerState::Date { id, input })
}
