use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Field, Item};
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::{input_spans, spans_width};

/// Width of the priority lozenge, padding included
const PRIORITY_W: usize = 8;
const ASSIGNEE_W: usize = 14;
const DATE_W: usize = 10;
/// Marker, checkbox and the separators between columns
const FIXED_W: usize = 2 + 3 + 1 + 1 + PRIORITY_W + 1 + ASSIGNEE_W + 1 + DATE_W + 1;

const PLACEHOLDER: &str = "Add new item...";

/// Render the item list, plus the add input while it has focus
pub fn render_checklist_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let adding = app.mode == Mode::NewItem;
    // The add input takes the last row of the area
    let list_height = (area.height as usize).saturating_sub(usize::from(adding));

    if app.store.is_empty() && !adding {
        let empty = Paragraph::new(" No items yet. Press a to add one.")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    app.clamp_cursor();
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if list_height > 0 && app.cursor >= app.scroll_offset + list_height {
        app.scroll_offset = app.cursor + 1 - list_height;
    }

    let width = area.width as usize;
    let end = app.store.len().min(app.scroll_offset + list_height);
    let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);
    for row in app.scroll_offset..end {
        if let Some(item) = app.store.get_index(row) {
            let is_cursor = row == app.cursor && !adding;
            lines.push(item_line(app, item, is_cursor, width));
        }
    }

    if adding {
        while lines.len() < list_height {
            lines.push(Line::from(""));
        }
        lines.push(new_item_line(app, width));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn item_line(app: &App, item: &Item, is_cursor: bool, width: usize) -> Line<'static> {
    let theme = &app.theme;
    let row_bg = if is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = Style::default().bg(row_bg);
    let editing_field = app.edits.editing_field(item.id);

    let mut spans: Vec<Span<'static>> = Vec::new();

    // Cursor marker
    if is_cursor {
        spans.push(Span::styled(
            "\u{258E} ",
            base.fg(theme.highlight).add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled("  ", base));
    }

    let checkbox = if item.is_checked { "[x]" } else { "[ ]" };
    let check_color = if item.is_checked {
        theme.green
    } else {
        theme.text
    };
    spans.push(Span::styled(checkbox, base.fg(check_color)));
    spans.push(Span::styled(" ", base));

    // Text, or the open draft
    let text_w = width.saturating_sub(FIXED_W);
    match app.edits.draft(item.id) {
        Some(draft) => {
            let draft_style = base.fg(theme.text_bright).add_modifier(Modifier::ITALIC);
            if app.mode == Mode::EditText && app.edit_target == Some(item.id) {
                spans.extend(input_spans(
                    draft,
                    app.edit_cursor,
                    text_w,
                    draft_style,
                    base.fg(theme.highlight),
                ));
            } else {
                spans.push(Span::styled(
                    unicode::fit_to_width(draft, text_w),
                    draft_style,
                ));
            }
        }
        None => {
            let style = if item.is_checked {
                base.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
            } else if is_cursor {
                base.fg(theme.text_bright)
            } else {
                base.fg(theme.text)
            };
            spans.push(Span::styled(
                unicode::fit_to_width(&item.text, text_w),
                style,
            ));
        }
    }
    spans.push(Span::styled(" ", base));

    // Priority lozenge
    let mut lozenge = Style::default()
        .fg(theme.background)
        .bg(theme.priority_color(item.priority))
        .add_modifier(Modifier::BOLD);
    if editing_field == Some(Field::Priority) {
        lozenge = lozenge.add_modifier(Modifier::REVERSED);
    }
    if item.is_checked {
        lozenge = lozenge.add_modifier(Modifier::DIM);
    }
    spans.push(Span::styled(
        unicode::fit_to_width(&format!(" {}", item.priority.label()), PRIORITY_W),
        lozenge,
    ));
    spans.push(Span::styled(" ", base));

    // Assignee
    let (assignee, assignee_color) = match &item.assignee {
        Some(user) => (user.display_name.as_str(), theme.text),
        None => ("Unassigned", theme.dim),
    };
    spans.push(Span::styled(
        unicode::fit_to_width(assignee, ASSIGNEE_W),
        field_style(app, base.fg(assignee_color), editing_field, Field::Assignee),
    ));
    spans.push(Span::styled(" ", base));

    // Due date
    let (date, date_color) = match item.due_date {
        Some(d) if !item.is_checked && d < app.dates.today() => {
            (d.format("%Y-%m-%d").to_string(), theme.red)
        }
        Some(d) => (d.format("%Y-%m-%d").to_string(), theme.text),
        None => ("No date".to_string(), theme.dim),
    };
    spans.push(Span::styled(
        unicode::fit_to_width(&date, DATE_W),
        field_style(app, base.fg(date_color), editing_field, Field::Date),
    ));

    // Fill the rest of the row so the cursor highlight spans the width
    let used = spans_width(&spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), base));
    }
    Line::from(spans)
}

/// Highlight a field column while its picker is open
fn field_style(app: &App, style: Style, editing: Option<Field>, field: Field) -> Style {
    if editing == Some(field) {
        style
            .fg(app.theme.highlight)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

fn new_item_line(app: &App, width: usize) -> Line<'static> {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(
        "  + ",
        Style::default().fg(app.theme.highlight).bg(bg),
    )];
    let input_w = width.saturating_sub(4);
    if app.new_item_buffer.is_empty() {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        spans.push(Span::styled(
            PLACEHOLDER,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        spans.extend(input_spans(
            &app.new_item_buffer,
            app.edit_cursor,
            input_w,
            Style::default().fg(app.theme.text_bright).bg(bg),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crossterm::event::KeyCode;

    use super::*;
    use crate::model::{ItemId, Priority, UserRef};
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::*;

    fn render_list(app: &mut App, h: u16) -> String {
        render_to_string(TERM_W, h, |frame, area| {
            render_checklist_view(frame, app, area)
        })
    }

    #[test]
    fn test_empty_list_hint() {
        let mut app = app_with_items(&[]);
        let output = render_list(&mut app, 3);
        assert_eq!(output, " No items yet. Press a to add one.");
    }

    #[test]
    fn test_row_columns() {
        let mut app = app_with_items(&["Run regression tests", "Update release notes"]);
        app.store.set_priority(ItemId(2), Priority::Low).unwrap();
        app.store
            .set_assignee(ItemId(2), Some(UserRef::new("ana", "Ana Lima")))
            .unwrap();
        app.store
            .set_due_date(ItemId(2), NaiveDate::from_ymd_opt(2025, 6, 2))
            .unwrap();
        app.store.toggle(ItemId(1)).unwrap();

        let output = render_list(&mut app, 2);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("\u{258E} [x] Run regression tests"));
        assert!(lines[0].contains(" Medium "));
        assert!(lines[0].contains("Unassigned"));
        assert!(lines[0].ends_with("No date"));
        assert!(lines[1].starts_with("  [ ] Update release notes"));
        assert!(lines[1].contains(" Low "));
        assert!(lines[1].contains("Ana Lima"));
        assert!(lines[1].ends_with("2025-06-02"));
    }

    #[test]
    fn test_columns_line_up() {
        let mut app = app_with_items(&["short", "a much longer item text"]);
        let output = render_list(&mut app, 2);
        let cols: Vec<usize> = output
            .lines()
            .map(|l| l[..l.find("Medium").unwrap()].chars().count())
            .collect();
        assert_eq!(cols[0], cols[1]);
    }

    #[test]
    fn test_long_text_is_truncated() {
        let long = "x".repeat(200);
        let mut app = app_with_items(&[long.as_str()]);
        let output = render_list(&mut app, 1);
        assert!(output.contains('\u{2026}'));
        assert!(output.ends_with("No date"));
    }

    #[test]
    fn test_draft_shown_with_caret() {
        let mut app = app_with_items(&["Deploy"]);
        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, " v2");
        let output = render_list(&mut app, 1);
        assert!(output.contains("Deploy v2\u{258C}"));
        // Committed text is still the old one
        assert_eq!(app.store.get(ItemId(1)).unwrap().text, "Deploy");
    }

    #[test]
    fn test_parked_draft_has_no_caret() {
        let mut app = app_with_items(&["Deploy", "Verify"]);
        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, "!");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('j'));
        let output = render_list(&mut app, 2);
        let first = output.lines().next().unwrap();
        assert!(first.contains("Deploy!"));
        assert!(!first.contains('\u{258C}'));
    }

    #[test]
    fn test_new_item_placeholder_and_input() {
        let mut app = app_with_items(&["Deploy"]);
        press(&mut app, KeyCode::Char('a'));
        let output = render_list(&mut app, 4);
        let last = output.lines().last().unwrap();
        assert_eq!(last, "  + \u{258C}Add new item...");
        // The list hides its cursor marker while the add input has focus
        assert!(!output.contains('\u{258E}'));

        type_str(&mut app, "Tag build");
        let output = render_list(&mut app, 4);
        assert_eq!(output.lines().last().unwrap(), "  + Tag build\u{258C}");
    }

    #[test]
    fn test_new_item_on_empty_list() {
        let mut app = app_with_items(&[]);
        press(&mut app, KeyCode::Char('a'));
        let output = render_list(&mut app, 3);
        assert!(!output.contains("No items yet"));
        assert!(output.ends_with("Add new item..."));
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let texts: Vec<String> = (1..=10).map(|i| format!("item {}", i)).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut app = app_with_items(&refs);
        app.cursor = 7;
        let output = render_list(&mut app, 4);
        assert_eq!(app.scroll_offset, 4);
        assert!(output.lines().next().unwrap().contains("item 5 "));
        assert!(output.lines().last().unwrap().contains("item 8 "));

        app.cursor = 1;
        render_list(&mut app, 4);
        assert_eq!(app.scroll_offset, 1);
    }
}
