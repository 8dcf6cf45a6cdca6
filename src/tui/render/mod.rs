pub mod checklist_view;
pub mod header;
pub mod help_overlay;
pub mod picker_popup;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;

use crate::util::unicode;

use super::app::App;

const CARET: &str = "\u{258C}"; // ▌

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | item list | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + progress bar
            Constraint::Min(1),    // items
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    checklist_view::render_checklist_view(frame, app, chunks[1]);

    // Picker popup sits over the list
    if app.picker.is_some() {
        picker_popup::render_picker_popup(frame, app, chunks[1]);
    }

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Spans for a single-line input: text with a caret at byte offset
/// `cursor`, exactly `width` cells wide. When the text before the caret
/// does not fit, its tail is shown.
pub(super) fn input_spans(
    buf: &str,
    cursor: usize,
    width: usize,
    text_style: Style,
    caret_style: Style,
) -> Vec<Span<'static>> {
    if width == 0 {
        return Vec::new();
    }
    let cursor = unicode::clamp_to_boundary(buf, cursor);
    let (before, after) = buf.split_at(cursor);
    let before_w = unicode::display_width(before);

    if before_w < width {
        return vec![
            Span::styled(before.to_string(), text_style),
            Span::styled(CARET, caret_style),
            Span::styled(unicode::fit_to_width(after, width - before_w - 1), text_style),
        ];
    }

    let tail = unicode::tail_to_width(before, width - 1);
    let pad = width - 1 - unicode::display_width(tail);
    vec![
        Span::styled(tail.to_string(), text_style),
        Span::styled(CARET, caret_style),
        Span::styled(" ".repeat(pad), text_style),
    ]
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// A `width` x `height` rect centered in `area`, clipped to it
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
