use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::lookup::{DatePicker, StaticDirectory, TextDatePicker, UserDirectory};
use crate::model::{ChecklistConfig, Item, ItemId};
use crate::ops::{EditController, ItemStore};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into an item's text draft (see `App::edit_target`)
    EditText,
    /// Typing into the "add new item" input
    NewItem,
    /// A field picker is open (see `App::picker`)
    Picker,
}

/// Interaction state of the open field picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerState {
    Priority {
        id: ItemId,
        /// Index into `Priority::ALL`
        cursor: usize,
    },
    Assignee {
        id: ItemId,
        query: String,
        /// 0 is "Unassigned", then the search results
        cursor: usize,
    },
    Date {
        id: ItemId,
        input: String,
    },
}

impl PickerState {
    pub fn item_id(&self) -> ItemId {
        match self {
            PickerState::Priority { id, .. }
            | PickerState::Assignee { id, .. }
            | PickerState::Date { id, .. } => *id,
        }
    }
}

/// Main application state
pub struct App {
    pub title: String,
    pub store: ItemStore,
    pub edits: EditController,
    pub directory: Box<dyn UserDirectory>,
    pub dates: Box<dyn DatePicker>,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the item list
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    /// Item whose draft receives keystrokes in EditText mode
    pub edit_target: Option<ItemId>,
    /// Byte offset of the caret in whichever line is being typed into
    pub edit_cursor: usize,
    /// Contents of the "add new item" input
    pub new_item_buffer: String,
    pub picker: Option<PickerState>,
    /// One-shot message for the status row, cleared on the next key
    pub status_message: Option<String>,
    pub show_help: bool,
    pub show_key_hints: bool,
}

impl App {
    pub fn new(config: &ChecklistConfig, store: ItemStore) -> Self {
        App {
            title: config.checklist.title.clone(),
            store,
            edits: EditController::new(),
            directory: Box::new(StaticDirectory::from_config(&config.users)),
            dates: Box::new(TextDatePicker::local()),
            theme: Theme::from_config(&config.ui),
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            edit_target: None,
            edit_cursor: 0,
            new_item_buffer: String::new(),
            picker: None,
            status_message: None,
            show_help: false,
            show_key_hints: config.ui.show_key_hints,
        }
    }

    /// The item under the cursor
    pub fn cursor_item(&self) -> Option<&Item> {
        self.store.get_index(self.cursor)
    }

    pub fn cursor_item_id(&self) -> Option<ItemId> {
        self.cursor_item().map(|i| i.id)
    }

    /// Keep the cursor inside the list after removals
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.store.len().saturating_sub(1));
    }

    pub fn move_cursor_to(&mut self, id: ItemId) {
        if let Some(pos) = self.store.position(id) {
            self.cursor = pos;
        }
    }

    /// Number of items with a text draft open
    pub fn open_draft_count(&self) -> usize {
        self.edits
            .editing_ids()
            .filter(|id| self.edits.is_editing_text(*id))
            .count()
    }
}

/// Run the panel until the user quits
pub fn run(config: &ChecklistConfig, store: ItemStore) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(config, store);
    info!(items = app.store.len(), "panel started");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal if anything panics mid-session
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(
        items = app.store.len(),
        checked = app.store.checked_count(),
        "panel closed"
    );
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::app_with_items;

    #[test]
    fn test_cursor_helpers() {
        let mut app = app_with_items(&["one", "two", "three"]);
        assert_eq!(app.cursor_item().unwrap().text, "one");

        app.cursor = 2;
        let id = app.cursor_item_id().unwrap();
        app.edits.remove(&mut app.store, id);
        app.clamp_cursor();
        assert_eq!(app.cursor, 1);

        app.move_cursor_to(ItemId(1));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_open_draft_count() {
        let mut app = app_with_items(&["one", "two"]);
        assert_eq!(app.open_draft_count(), 0);
        app.edits.begin_text(&app.store, ItemId(1));
        app.edits
            .open_field(&app.store, ItemId(2), crate::model::Field::Priority);
        assert_eq!(app.open_draft_count(), 1);
    }
}
