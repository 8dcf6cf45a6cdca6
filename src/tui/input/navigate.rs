use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{Field, Priority};
use crate::tui::app::{App, Mode, PickerState};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.show_help = true,

        // Cursor movement
        (_, KeyCode::Char('j') | KeyCode::Down) => {
            if app.cursor + 1 < app.store.len() {
                app.cursor += 1;
            }
        }
        (_, KeyCode::Char('k') | KeyCode::Up) => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.store.len().saturating_sub(1);
        }

        (_, KeyCode::Char(' ')) => toggle_cursor_item(app),
        (_, KeyCode::Char('a') | KeyCode::Char('o')) => {
            app.new_item_buffer.clear();
            app.edit_cursor = 0;
            app.mode = Mode::NewItem;
        }
        (_, KeyCode::Char('e') | KeyCode::Enter) => begin_text_edit(app),
        (_, KeyCode::Char('p')) => open_picker(app, Field::Priority),
        (_, KeyCode::Char('u')) => open_picker(app, Field::Assignee),
        (_, KeyCode::Char('d')) => open_picker(app, Field::Date),
        (_, KeyCode::Char('x') | KeyCode::Delete) => delete_cursor_item(app),
        _ => {}
    }
}

fn toggle_cursor_item(app: &mut App) {
    if let Some(id) = app.cursor_item_id() {
        let _ = app.store.toggle(id);
    }
}

fn delete_cursor_item(app: &mut App) {
    let Some(id) = app.cursor_item_id() else {
        return;
    };
    let text = app.cursor_item().map(|i| i.text.clone()).unwrap_or_default();
    app.edits.remove(&mut app.store, id);
    app.clamp_cursor();
    app.status_message = Some(format!("deleted \"{}\"", text));
}

/// Enter text edit on the cursor item, resuming a kept draft if there is one.
fn begin_text_edit(app: &mut App) {
    let Some(id) = app.cursor_item_id() else {
        return;
    };
    app.edits.begin_text(&app.store, id);
    app.edit_cursor = app.edits.draft(id).map_or(0, str::len);
    app.edit_target = Some(id);
    app.mode = Mode::EditText;
}

fn open_picker(app: &mut App, field: Field) {
    let Some(item) = app.cursor_item() else {
        return;
    };
    let id = item.id;
    let picker = match field {
        Field::Priority => PickerState::Priority {
            id,
            cursor: Priority::ALL
                .iter()
                .position(|p| *p == item.priority)
                .unwrap_or(1),
        },
        Field::Assignee => {
            let cursor = item
                .assignee
                .as_ref()
                .and_then(|a| app.directory.search("").iter().position(|u| u.id == a.id))
                .map_or(0, |pos| pos + 1);
            PickerState::Assignee {
                id,
                query: String::new(),
                cursor,
            }
        }
        Field::Date => PickerState::Date {
            id,
            input: item
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        },
    };
    app.edit_cursor = match &picker {
        PickerState::Date { input, .. } => input.len(),
        _ => 0,
    };
    app.edits.open_field(&app.store, id, field);
    app.picker = Some(picker);
    app.mode = Mode::Picker;
}
