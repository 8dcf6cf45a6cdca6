mod edit;
mod navigate;
mod picker;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

use edit::{handle_edit_text, handle_new_item};
use navigate::handle_navigate;
use picker::handle_picker;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status_message = None;

    // Help overlay swallows the key that closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::EditText => handle_edit_text(app, key),
        Mode::NewItem => handle_new_item(app, key),
        Mode::Picker => handle_picker(app, key),
    }
}

#[cfg(test)]
pub(crate) mod test_keys {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::handle_key;
    use crate::tui::app::App;

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Press each char of `s` as a plain key
    pub fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    pub fn press(app: &mut App, code: KeyCode) {
        handle_key(app, key(code));
    }
}
