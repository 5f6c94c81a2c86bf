// Title bar component
//
// App name, the institution the receipts belong to, and a spinner while a
// remote call is outstanding.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let activity = match app.activity() {
        Some(activity) => format!("  {} {}…", app.spinner_char(), activity),
        None => String::new(),
    };

    let title_text = format!(" feedesk ──── {}{}", app.institution.name, activity);

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(" ? ").right_aligned()),
        );

    f.render_widget(title, area);
}
