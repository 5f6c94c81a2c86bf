// Receipt view component
//
// Draws a ReceiptLayout block for block, in the same order the PDF uses.
// The identity grid reflows to the terminal width; full-width fields
// (Address) always take a row of their own.

use super::formatters::{pad_left, pad_right};
use crate::render::{Field, ReceiptLayout, RowKind};
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Column width of identity labels
const LABEL_WIDTH: usize = 14;

/// Column widths of the fee table's S.No and Amount columns
const SERIAL_WIDTH: usize = 6;
const AMOUNT_WIDTH: usize = 14;

pub fn render(f: &mut Frame, area: Rect, app: &App, layout: &ReceiptLayout) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight))
        .title(format!(" Receipt · {} ", layout_admission_no(layout)))
        .title_bottom(
            Line::from(" d download · y copy · Esc back ").right_aligned(),
        );

    let inner_width = area.width.saturating_sub(2) as usize;
    let lines = receipt_lines(layout, inner_width, theme);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.receipt_scroll, 0));
    f.render_widget(paragraph, area);
}

fn layout_admission_no(layout: &ReceiptLayout) -> &str {
    layout
        .identity
        .first()
        .map(|f| f.value.as_str())
        .unwrap_or_default()
}

/// The receipt as styled lines for a view `width` columns wide
pub fn receipt_lines(layout: &ReceiptLayout, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let bold = Modifier::BOLD;
    let mut lines = Vec::new();

    // Header
    lines.push(
        Line::from(Span::styled(
            layout.header.institution.clone(),
            Style::default().fg(theme.title).add_modifier(bold),
        ))
        .centered(),
    );
    for address in &layout.header.address_lines {
        lines.push(
            Line::from(Span::styled(
                address.clone(),
                Style::default().fg(theme.muted),
            ))
            .centered(),
        );
    }
    lines.push(Line::raw(""));
    lines.push(
        Line::from(Span::styled(
            layout.header.title.to_string(),
            Style::default().fg(theme.highlight).add_modifier(bold),
        ))
        .centered(),
    );
    lines.push(Line::raw(""));

    // Identity grid
    let columns = Breakpoint::from_width(width as u16).grid_columns();
    let cell_width = (width / columns).max(LABEL_WIDTH + 4);
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut filled = 0;
    for field in &layout.identity {
        if field.full_width {
            if filled > 0 {
                lines.push(Line::from(std::mem::take(&mut row)));
                filled = 0;
            }
            lines.push(Line::from(field_spans(field, width, theme)));
            continue;
        }
        row.extend(field_spans(field, cell_width, theme));
        filled += 1;
        if filled == columns {
            lines.push(Line::from(std::mem::take(&mut row)));
            filled = 0;
        }
    }
    if filled > 0 {
        lines.push(Line::from(row));
    }
    lines.push(Line::raw(""));

    // Fee table
    let head_width = width
        .saturating_sub(SERIAL_WIDTH + AMOUNT_WIDTH + 2)
        .max(8);
    let [serial, head, amount] = layout.fee_table.columns;
    lines.push(Line::from(Span::styled(
        format!(
            "{} {} {}",
            pad_right(serial, SERIAL_WIDTH),
            pad_right(head, head_width),
            pad_left(amount, AMOUNT_WIDTH)
        ),
        Style::default().fg(theme.label).add_modifier(bold),
    )));
    let rule = "─".repeat(SERIAL_WIDTH + head_width + AMOUNT_WIDTH + 2);
    lines.push(Line::from(Span::styled(
        rule.clone(),
        Style::default().fg(theme.border),
    )));
    for fee in &layout.fee_table.rows {
        let style = match fee.kind {
            RowKind::Item => Style::default().fg(theme.foreground),
            RowKind::Total => Style::default().fg(theme.total).add_modifier(bold),
        };
        if fee.kind == RowKind::Total {
            lines.push(Line::from(Span::styled(
                rule.clone(),
                Style::default().fg(theme.border),
            )));
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "{} {} ",
                    pad_right(&fee.serial, SERIAL_WIDTH),
                    pad_right(&fee.head, head_width)
                ),
                style,
            ),
            Span::styled(
                pad_left(&fee.amount, AMOUNT_WIDTH),
                match fee.kind {
                    RowKind::Item => Style::default().fg(theme.amount),
                    RowKind::Total => style,
                },
            ),
        ]));
    }
    lines.push(Line::raw(""));

    // Payment
    for field in &layout.payment {
        lines.push(Line::from(field_spans(field, width, theme)));
    }
    lines.push(Line::raw(""));

    // Clerk
    lines.push(
        Line::from(Span::styled(
            layout.clerk.name.clone(),
            Style::default().fg(theme.foreground).add_modifier(bold),
        ))
        .right_aligned(),
    );
    lines.push(
        Line::from(Span::styled(
            layout.clerk.caption.to_string(),
            Style::default().fg(theme.muted),
        ))
        .right_aligned(),
    );

    lines
}

/// Label and value padded to exactly `width` columns
fn field_spans(field: &Field, width: usize, theme: &Theme) -> Vec<Span<'static>> {
    let label = pad_right(field.label, LABEL_WIDTH);
    let value_width = width.saturating_sub(label.width() + 1);
    vec![
        Span::styled(format!("{} ", label), Style::default().fg(theme.label)),
        Span::styled(
            pad_right(&field.value, value_width),
            Style::default().fg(theme.foreground),
        ),
    ]
}
