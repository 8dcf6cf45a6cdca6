use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::StoreError;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Apply a line-editing key to `buf`. Returns false for keys it does not handle.
pub(super) fn edit_line(buf: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    *cursor = unicode::clamp_to_boundary(buf, *cursor);
    match (key.modifiers, key.code) {
        // Home / Ctrl+A
        (_, KeyCode::Home) => *cursor = 0,
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => *cursor = 0,
        // End / Ctrl+E
        (_, KeyCode::End) => *cursor = buf.len(),
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => *cursor = buf.len(),
        // Kill to start of line
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            buf.drain(..*cursor);
            *cursor = 0;
        }
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buf, *cursor) {
                *cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(buf, *cursor) {
                *cursor = next;
            }
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buf, *cursor) {
                buf.drain(prev..*cursor);
                *cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(buf, *cursor) {
                buf.drain(*cursor..next);
            }
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            buf.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        _ => return false,
    }
    true
}

/// Keys while an item's text draft has focus
pub(super) fn handle_edit_text(app: &mut App, key: KeyEvent) {
    let Some(id) = app.edit_target else {
        app.mode = Mode::Navigate;
        return;
    };
    match key.code {
        KeyCode::Enter => match app.edits.confirm_text(&mut app.store, id) {
            Ok(()) => leave_text_edit(app),
            Err(StoreError::EmptyText) => {
                app.status_message = Some("text cannot be empty".to_string());
            }
            Err(StoreError::NotFound(_)) => leave_text_edit(app),
        },
        KeyCode::Esc => {
            app.edits.cancel_text(&app.store, id);
            leave_text_edit(app);
        }
        // Keep the draft open on the item and go back to the list
        KeyCode::Tab => leave_text_edit(app),
        _ => {
            if let Some(draft) = app.edits.draft_mut(id) {
                edit_line(draft, &mut app.edit_cursor, key);
            } else {
                leave_text_edit(app);
            }
        }
    }
}

fn leave_text_edit(app: &mut App) {
    app.edit_target = None;
    app.edit_cursor = 0;
    app.mode = Mode::Navigate;
}

/// Keys while the "add new item" input has focus
pub(super) fn handle_new_item(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => match app.store.add(&app.new_item_buffer) {
            Ok(id) => {
                app.new_item_buffer.clear();
                app.edit_cursor = 0;
                app.move_cursor_to(id);
                app.mode = Mode::Navigate;
            }
            Err(_) => {
                app.status_message = Some("text cannot be empty".to_string());
            }
        },
        KeyCode::Esc => {
            app.new_item_buffer.clear();
            app.edit_cursor = 0;
            app.mode = Mode::Navigate;
        }
        _ => {
            edit_line(&mut app.new_item_buffer, &mut app.edit_cursor, key);
        }
    }
}
