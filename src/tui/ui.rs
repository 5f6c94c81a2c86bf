// UI rendering
//
// Screen layout, top to bottom: title bar, search box, content (result list
// or receipt), status bar. Modals and the toast draw over everything.

use super::app::App;
use super::components;
use super::modal::Modal;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Search
            Constraint::Min(6),    // Results or receipt
            Constraint::Length(2), // Status
        ])
        .split(f.area());

    components::render_title(f, chunks[0], app);
    components::render_search_box(f, chunks[1], app);
    match app.receipt_layout() {
        Some(layout) => components::render_receipt_view(f, chunks[2], app, &layout),
        None => components::render_results_table(f, chunks[2], app),
    }
    components::render_status_bar(f, chunks[3], app);

    if let Some(modal) = &app.modal {
        render_modal(f, modal, app);
    }

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Modals
// ─────────────────────────────────────────────────────────────────────────────

fn render_modal(f: &mut Frame, modal: &Modal, app: &App) {
    let area = f.area();
    let (content, rect, hint) = match modal {
        Modal::Help => (
            help_text(app),
            centered_rect(52, 24, area),
            " Press ? or Esc to close ",
        ),
        Modal::Notice(message) => (
            notice_text(message, app),
            centered_rect(44, 7, area),
            " Enter to dismiss ",
        ),
        Modal::Logs => {
            let rect = centered_rect(area.width.saturating_sub(8), area.height.saturating_sub(4), area);
            (
                logs_text(app, rect.height.saturating_sub(2) as usize),
                rect,
                " ↑/↓ scroll · End newest · Esc close ",
            )
        }
    };

    // Clear the area behind the modal
    f.render_widget(Clear, rect);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(modal.title())
                .title_bottom(Line::from(hint).centered()),
        );
    f.render_widget(paragraph, rect);
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn help_text(app: &App) -> Text<'static> {
    let key_style = Style::default().fg(app.theme.label);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);

    // "    key         description"
    let kb = |key: &'static str, desc: &'static str| -> Line<'static> {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc, desc_style),
        ])
    };

    Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Search", header_style)),
        kb("Enter", "Search name, admission no or phone"),
        kb("↓ / Tab", "Go to results"),
        kb("/", "Back to the search box"),
        Line::raw(""),
        Line::from(Span::styled("  Results", header_style)),
        kb("↑/↓, j/k", "Select a row"),
        kb("PgUp/PgDn", "Move ten rows"),
        kb("Enter", "Open receipt"),
        Line::raw(""),
        Line::from(Span::styled("  Receipt", header_style)),
        kb("d", "Download PDF"),
        kb("y", "Copy as text"),
        kb("↑/↓", "Scroll"),
        kb("Esc", "Back to results"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("L", "Show logs"),
        kb("?", "Toggle this help"),
        kb("q, Ctrl+C", "Quit"),
    ])
}

fn notice_text(message: &str, app: &App) -> Text<'static> {
    Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(app.theme.error)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::raw(""),
        Line::from(Span::styled(
            "Details are in the log (L)",
            Style::default().fg(app.theme.muted),
        ))
        .centered(),
    ])
}

/// The `rows` entries ending `app.log_scroll` entries before the newest
fn logs_text(app: &App, rows: usize) -> Text<'static> {
    let entries = app.log_buffer.get_all();
    let end = entries.len().saturating_sub(app.log_scroll);
    let start = end.saturating_sub(rows);

    let lines: Vec<Line<'static>> = entries[start..end]
        .iter()
        .map(|entry| {
            let color = match entry.level {
                crate::logging::LogLevel::Error => app.theme.error,
                crate::logging::LogLevel::Warn => app.theme.warn,
                crate::logging::LogLevel::Info => app.theme.foreground,
                _ => app.theme.muted,
            };
            Line::from(vec![
                Span::styled(entry.line(), Style::default().fg(color)),
                Span::styled(
                    format!("  [{}]", entry.target),
                    Style::default().fg(app.theme.muted),
                ),
            ])
        })
        .collect();

    if lines.is_empty() {
        return Text::from(Line::from(Span::styled(
            "No log entries yet",
            Style::default().fg(app.theme.muted),
        )));
    }
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logging::{LogBuffer, LogEntry, LogLevel};
    use crate::model::fixtures::{receipt, summary};
    use crate::tui::app::{ApiEvent, Request};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with_results() -> App {
        let mut app = App::with_config(LogBuffer::new(), &Config::default());
        app.input = "kaur".to_string();
        let Some(Request::Search(req)) = app.submit_search() else {
            panic!("search not issued");
        };
        app.apply(ApiEvent::SearchDone {
            token: req.token,
            result: Ok(vec![summary("1001", "Simran Kaur")]),
        });
        app
    }

    #[test]
    fn list_view_shows_results() {
        let app = app_with_results();
        let screen = screen(&app, 100, 20);
        assert!(screen.contains("Results (1)"));
        assert!(screen.contains("Simran Kaur"));
        assert!(screen.contains("1001"));
    }

    #[test]
    fn receipt_view_replaces_list() {
        let mut app = app_with_results();
        let Some(Request::Load(req)) = app.open_selected() else {
            panic!("load not issued");
        };
        app.apply(ApiEvent::ReceiptDone {
            token: req.token,
            result: Ok(receipt("1001")),
        });

        let screen = screen(&app, 100, 40);
        assert!(screen.contains("Fee Receipt"));
        assert!(screen.contains("Tuition Fee"));
        assert!(!screen.contains("Results ("));
    }

    #[test]
    fn notice_modal_is_drawn() {
        let mut app = App::with_config(LogBuffer::new(), &Config::default());
        app.modal = Some(Modal::notice("Receipt not found"));
        assert!(screen(&app, 80, 20).contains("Receipt not found"));
    }

    #[test]
    fn status_bar_shows_latest_log_line() {
        let buffer = LogBuffer::new();
        buffer.add(LogEntry {
            timestamp: chrono::Local::now(),
            level: LogLevel::Info,
            target: "feedesk".to_string(),
            message: "Search returned 3 result(s)".to_string(),
        });
        let app = App::with_config(buffer, &Config::default());
        assert!(screen(&app, 120, 12).contains("Search returned 3"));
    }
}
