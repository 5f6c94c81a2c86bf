// Status bar component
//
// Key hints for the current focus on the left, the newest log line on the
// right.

use crate::logging::LogLevel;
use crate::tui::app::{App, Focus};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::formatters::truncate;

/// Key hints for what the operator is looking at
pub fn hints(app: &App) -> &'static str {
    match (app.focus, app.session.selected().is_some()) {
        (Focus::Search, _) => " Enter search · ↓ results · Esc back · Ctrl+C quit",
        (Focus::Content, false) => " ↑/↓ select · Enter open · / search · L logs · ? help · q quit",
        (Focus::Content, true) => " d download PDF · y copy · Esc back · / search · ? help · q quit",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::TOP);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let wide = Breakpoint::from_width(area.width) != Breakpoint::Compact;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if wide {
            [Constraint::Percentage(55), Constraint::Percentage(45)]
        } else {
            [Constraint::Percentage(100), Constraint::Percentage(0)]
        })
        .split(inner);

    f.render_widget(
        Paragraph::new(hints(app)).style(Style::default().fg(app.theme.status_bar)),
        chunks[0],
    );

    if let Some(entry) = app.log_buffer.latest().filter(|_| wide) {
        let color = match entry.level {
            LogLevel::Error => app.theme.error,
            LogLevel::Warn => app.theme.warn,
            _ => app.theme.muted,
        };
        let line = truncate(&entry.line(), chunks[1].width as usize);
        f.render_widget(
            Paragraph::new(line)
                .style(Style::default().fg(color))
                .alignment(Alignment::Right),
            chunks[1],
        );
    }
}
