use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::{ItemId, Priority};
use crate::tui::app::{App, PickerState};
use crate::util::unicode;

use super::{centered_rect_fixed, input_spans};

const POPUP_W: u16 = 40;
/// Most user rows shown below "Unassigned"
const MAX_USER_ROWS: usize = 6;

/// Render the open field picker centered over `area`
pub fn render_picker_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(picker) = &app.picker else {
        return;
    };
    let inner_w = POPUP_W.min(area.width).saturating_sub(2) as usize;

    let (title, mut lines) = match picker {
        PickerState::Priority { cursor, .. } => (" Priority ", priority_lines(app, *cursor)),
        PickerState::Assignee { query, cursor, .. } => {
            (" Assignee ", assignee_lines(app, query, *cursor, inner_w))
        }
        PickerState::Date { input, .. } => (" Due date ", date_lines(app, input, inner_w)),
    };
    lines.insert(0, item_line(app, picker.item_id(), inner_w));
    lines.insert(1, Line::from(""));

    let popup_h = lines.len() as u16 + 2;
    let popup_area = centered_rect_fixed(POPUP_W, popup_h, area);
    frame.render_widget(Clear, popup_area);

    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(bg)),
        popup_area,
    );
}

/// The item being edited, as a dimmed header line
fn item_line(app: &App, id: ItemId, width: usize) -> Line<'static> {
    let text = app.store.get(id).map_or("", |item| item.text.as_str());
    Line::from(Span::styled(
        unicode::truncate_to_width(&format!(" {}", text), width),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ))
}

fn row_style(app: &App, selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}

fn marker(selected: bool) -> &'static str {
    if selected { " \u{25B8} " } else { "   " }
}

fn priority_lines(app: &App, cursor: usize) -> Vec<Line<'static>> {
    Priority::ALL
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let selected = i == cursor;
            let style = row_style(app, selected);
            Line::from(vec![
                Span::styled(marker(selected), style),
                Span::styled(
                    format!(" {:<6} ", p.label()),
                    Style::default()
                        .fg(app.theme.background)
                        .bg(app.theme.priority_color(*p))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", i + 1), style.fg(app.theme.dim)),
            ])
        })
        .collect()
}

fn assignee_lines(app: &App, query: &str, cursor: usize, width: usize) -> Vec<Line<'static>> {
    let bg = app.theme.background;
    let prompt = " Search: ";
    let mut search = vec![Span::styled(prompt, Style::default().fg(app.theme.dim).bg(bg))];
    search.extend(input_spans(
        query,
        app.edit_cursor,
        width.saturating_sub(prompt.len()),
        Style::default().fg(app.theme.text_bright).bg(bg),
        Style::default().fg(app.theme.highlight).bg(bg),
    ));
    let mut lines = vec![Line::from(search), Line::from("")];

    let unassigned = cursor == 0;
    lines.push(Line::from(vec![
        Span::styled(marker(unassigned), row_style(app, unassigned)),
        Span::styled(
            "Unassigned",
            row_style(app, unassigned).fg(app.theme.dim),
        ),
    ]));

    let results = app.directory.search(query);
    if results.is_empty() {
        lines.push(Line::from(Span::styled(
            "   no matching users",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        return lines;
    }

    // Keep the cursor row in view
    let first = cursor.saturating_sub(MAX_USER_ROWS).min(results.len());
    for (i, user) in results.iter().enumerate().skip(first).take(MAX_USER_ROWS) {
        let selected = cursor == i + 1;
        let style = row_style(app, selected);
        let name = unicode::truncate_to_width(&user.display_name, width.saturating_sub(3 + 12));
        lines.push(Line::from(vec![
            Span::styled(marker(selected), style),
            Span::styled(name, style),
            Span::styled(format!("  @{}", user.id), style.fg(app.theme.dim)),
        ]));
    }
    lines
}

fn date_lines(app: &App, input: &str, width: usize) -> Vec<Line<'static>> {
    let bg = app.theme.background;
    let prompt = " Date: ";
    let mut spans = vec![Span::styled(prompt, Style::default().fg(app.theme.dim).bg(bg))];
    spans.extend(input_spans(
        input,
        app.edit_cursor,
        width.saturating_sub(prompt.len()),
        Style::default().fg(app.theme.text_bright).bg(bg),
        Style::default().fg(app.theme.highlight).bg(bg),
    ));

    let hint_style = Style::default().fg(app.theme.dim).bg(bg);
    vec![
        Line::from(spans),
        Line::from(""),
        Line::from(Span::styled(" YYYY-MM-DD, today, tomorrow,", hint_style)),
        Line::from(Span::styled(" +3d, +2w, or none to clear", hint_style)),
    ]
}
