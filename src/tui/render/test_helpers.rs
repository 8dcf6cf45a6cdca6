use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::lookup::{StaticDirectory, TextDatePicker};
use crate::model::{ChecklistConfig, UserRef};
use crate::ops::ItemStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole panel for `app` at the default test size.
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// The date every test treats as today.
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 30).unwrap()
}

/// Build an App holding one unchecked item per entry in `texts`, titled
/// "Release", with a three-user directory and a fixed "today".
pub fn app_with_items(texts: &[&str]) -> App {
    let mut store = ItemStore::new();
    for text in texts {
        store.add(text).unwrap();
    }
    let mut config = ChecklistConfig::default();
    config.checklist.title = "Release".into();

    let mut app = App::new(&config, store);
    app.directory = Box::new(StaticDirectory::new(vec![
        UserRef::new("ana", "Ana Lima"),
        UserRef::new("bo", "Bo Svensson"),
        UserRef::new("carla", "Carla Diaz"),
    ]));
    app.dates = Box::new(TextDatePicker::new(test_today()));
    app
}
