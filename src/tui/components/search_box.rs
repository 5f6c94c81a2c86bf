// Search box component

use crate::tui::app::{App, Focus};
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Search;
    let border = if focused {
        app.theme.highlight
    } else {
        app.theme.border
    };

    let (text, style) = if app.input.is_empty() && focused {
        (
            "Name, admission number or phone".to_string(),
            Style::default().fg(app.theme.muted),
        )
    } else {
        (app.input.clone(), Style::default().fg(app.theme.foreground))
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(border))
            .title(" Search "),
    );
    f.render_widget(input, area);

    if focused {
        let x = area.x + 1 + app.input.width() as u16;
        f.set_cursor_position(Position::new(x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}
