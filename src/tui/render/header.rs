use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

const FILLED: &str = "\u{2588}"; // █
const EMPTY: &str = "\u{2591}"; // ░

/// Render the title row and the progress bar below it
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title + count
            Constraint::Length(1), // progress bar
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    render_progress(frame, app, chunks[1]);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let count = format!(
        "{}/{} done ",
        app.store.checked_count(),
        app.store.len()
    );
    let count_w = unicode::display_width(&count);
    let title_room = width.saturating_sub(count_w + 2);
    let title = unicode::truncate_to_width(&app.title, title_room);
    let title_w = unicode::display_width(&title) + 1;

    let mut spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if title_w + count_w <= width {
        spans.push(Span::styled(
            " ".repeat(width - title_w - count_w),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(count, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let label = format!(" {:>3}%", app.store.percent_complete());
    // One column of margin on each side of the bar
    let bar_w = (area.width as usize).saturating_sub(label.len() + 2);
    let filled = filled_cells(app.store.progress(), bar_w);

    let line = Line::from(vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            FILLED.repeat(filled),
            Style::default().fg(app.theme.progress_fill).bg(bg),
        ),
        Span::styled(
            EMPTY.repeat(bar_w - filled),
            Style::default().fg(app.theme.progress_track).bg(bg),
        ),
        Span::styled(label, Style::default().fg(app.theme.text).bg(bg)),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

/// Cells of a `width`-wide bar to fill for a progress value in [0, 1]
fn filled_cells(progress: f64, width: usize) -> usize {
    ((progress.clamp(0.0, 1.0) * width as f64).floor() as usize).min(width)
}
