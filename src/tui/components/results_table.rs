// Result list component
//
// One row per search result in service order. The empty table explains
// itself: nothing searched yet, searching, no matches, or failure.

use crate::session::SearchState;
use crate::tui::app::{App, Focus};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Message for an empty list
pub fn empty_message(state: &SearchState) -> &'static str {
    match state {
        SearchState::Idle => "Type a query and press Enter",
        SearchState::Searching(_) => "Searching…",
        SearchState::Success => "No matching receipts",
        SearchState::Failed => "Search failed",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let results = app.session.visible_results();
    let focused = app.focus == Focus::Content;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(if focused {
            theme.highlight
        } else {
            theme.border
        }))
        .title(format!(" Results ({}) ", results.len()))
        .title_bottom(Line::from(" ↑/↓ select · Enter open ").right_aligned());

    if results.is_empty() {
        let message = Paragraph::new(empty_message(app.session.search_state()))
            .style(Style::default().fg(theme.muted))
            .block(block);
        f.render_widget(message, area);
        return;
    }

    let full = Breakpoint::from_width(area.width).shows_all_result_columns();

    let mut header = vec!["Receipt", "Student's Name", "Adm No"];
    let mut widths = vec![
        Constraint::Length(10),
        Constraint::Fill(2),
        Constraint::Length(12),
    ];
    if full {
        header.extend(["Mobile No", "Session"]);
        widths.extend([Constraint::Length(12), Constraint::Length(10)]);
    }

    let rows = results.iter().map(|r| {
        let mut cells = vec![
            Cell::from(r.receipt_number.as_str()),
            Cell::from(r.student_name.as_str()),
            Cell::from(r.admission_no.as_str()),
        ];
        if full {
            cells.push(Cell::from(r.mobile.as_str()));
            cells.push(Cell::from(r.session.as_str()));
        }
        Row::new(cells).style(Style::default().fg(theme.foreground))
    });

    let table = Table::new(rows, widths)
        .header(
            Row::new(header).style(
                Style::default()
                    .fg(theme.label)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .row_highlight_style(
            Style::default()
                .bg(theme.selection)
                .fg(theme.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ")
        .block(block);

    let mut state = TableState::default().with_selected(Some(app.selected_row));
    f.render_stateful_widget(table, area, &mut state);
}
