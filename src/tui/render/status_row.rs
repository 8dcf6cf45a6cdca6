use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, PickerState};
use crate::util::unicode;

use super::spans_width;

const NAVIGATE_HINT: &str = "a add  e edit  \u{2423} toggle  p/u/d fields  x delete  ? help";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if let Some(msg) = &app.status_message {
        spans.push(Span::styled(
            format!(" {}", msg),
            Style::default().fg(app.theme.yellow).bg(bg),
        ));
    } else {
        let drafts = app.open_draft_count();
        if drafts > 0 && app.mode == Mode::Navigate {
            let noun = if drafts == 1 { "draft" } else { "drafts" };
            spans.push(Span::styled(
                format!(" {} open {}", drafts, noun),
                Style::default().fg(app.theme.text).bg(bg),
            ));
        }
    }

    if let Some(hint) = mode_hint(app) {
        let used = spans_width(&spans);
        let hint_w = unicode::display_width(hint);
        if used + hint_w + 1 <= width {
            spans.push(Span::styled(
                " ".repeat(width - used - hint_w - 1),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Key hint for the current mode. Navigate hints are opt-in.
fn mode_hint(app: &App) -> Option<&'static str> {
    match app.mode {
        Mode::Navigate => app.show_key_hints.then_some(NAVIGATE_HINT),
        Mode::EditText => Some("Enter save  Esc cancel  Tab keep draft"),
        Mode::NewItem => Some("Enter add  Esc cancel"),
        Mode::Picker => match app.picker {
            Some(PickerState::Priority { .. }) => Some("l/m/h pick  Enter select  Esc cancel"),
            Some(PickerState::Assignee { .. }) => {
                Some("type to search  \u{2191}\u{2193} move  Enter select  Esc cancel")
            }
            Some(PickerState::Date { .. }) => Some("Enter set  Esc cancel"),
            None => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::*;
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::*;

    fn render_row(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn test_navigate_is_blank_without_hints() {
        let app = app_with_items(&["a"]);
        assert_eq!(render_row(&app), "");
    }

    #[test]
    fn test_navigate_hints_when_enabled() {
        let mut app = app_with_items(&["a"]);
        app.show_key_hints = true;
        let output = render_row(&app);
        assert!(output.ends_with("? help"));
        assert_eq!(unicode::display_width(&output), TERM_W as usize - 1);
    }

    #[test]
    fn test_message_and_hint() {
        let mut app = app_with_items(&["abc"]);
        press(&mut app, KeyCode::Char('e'));
        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Enter);
        let output = render_row(&app);
        assert!(output.starts_with(" text cannot be empty"));
        assert!(output.ends_with("Tab keep draft"));
    }

    #[test]
    fn test_open_draft_count() {
        let mut app = app_with_items(&["a", "b"]);
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(render_row(&app), " 1 open draft");

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(render_row(&app), " 2 open drafts");
    }

    #[test]
    fn test_picker_hints() {
        let mut app = app_with_items(&["a"]);
        press(&mut app, KeyCode::Char('d'));
        assert!(render_row(&app).ends_with("Enter set  Esc cancel"));
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('u'));
        assert!(render_row(&app).contains("type to search"));
    }
}
