use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect_fixed;

const KEY_W: usize = 14;

/// Render the help overlay (opened with ?, closed by any key)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Items", header_style)));
    add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
    add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
    add_binding(&mut lines, " Space", "Check / uncheck", key_style, desc_style);
    add_binding(&mut lines, " a", "Add item", key_style, desc_style);
    add_binding(&mut lines, " x/Del", "Delete item", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Editing", header_style)));
    add_binding(&mut lines, " e/Enter", "Edit text", key_style, desc_style);
    add_binding(&mut lines, " p", "Set priority", key_style, desc_style);
    add_binding(&mut lines, " u", "Set assignee", key_style, desc_style);
    add_binding(&mut lines, " d", "Set due date", key_style, desc_style);
    add_binding(&mut lines, " Enter", "Save", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Cancel", key_style, desc_style);
    add_binding(&mut lines, " Tab", "Keep draft, back to list", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " ?", "This help", key_style, desc_style);
    add_binding(&mut lines, " q/Ctrl+C", "Quit", key_style, desc_style);

    let overlay_area = centered_rect_fixed(44, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    lines.push(Line::from(vec![
        Span::styled(format!("{:<width$}", key, width = KEY_W), key_style),
        Span::styled(desc, desc_style),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn test_help_lists_bindings() {
        let app = app_with_items(&[]);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &app, area)
        });
        assert!(output.contains("Key Bindings"));
        assert!(output.contains("Space        Check / uncheck"));
        assert!(output.contains("Tab          Keep draft, back to list"));
        assert!(output.contains("q/Ctrl+C     Quit"));
    }
}
