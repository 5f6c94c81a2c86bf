// Color theme for the TUI
//
// A single fixed palette (One Half Dark). Components take colors from here
// rather than hardcoding them.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

#[derive(Debug, Clone)]
pub struct Theme {
    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,

    // ─── UI Element Colors ───────────────────────────────────
    pub title: Color,
    pub border: Color,
    pub highlight: Color, // Focused border, toast, modal frame
    pub status_bar: Color,
    pub muted: Color,

    // ─── Selection Colors ────────────────────────────────────
    pub selection: Color,
    pub selection_fg: Color,

    // ─── Receipt Colors ──────────────────────────────────────
    pub label: Color,
    pub amount: Color,
    pub total: Color,

    // ─── Notice Colors ───────────────────────────────────────
    pub error: Color,
    pub warn: Color,

    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(40, 44, 52),
            foreground: Color::Rgb(220, 223, 228),

            title: Color::Rgb(86, 182, 194),
            border: Color::Rgb(92, 99, 112),
            highlight: Color::Rgb(229, 192, 123),
            status_bar: Color::Rgb(220, 223, 228),
            muted: Color::Rgb(127, 132, 142),

            selection: Color::Rgb(71, 78, 93),
            selection_fg: Color::Rgb(220, 223, 228),

            label: Color::Rgb(97, 175, 239),
            amount: Color::Rgb(152, 195, 121),
            total: Color::Rgb(229, 192, 123),

            error: Color::Rgb(224, 108, 117),
            warn: Color::Rgb(229, 192, 123),

            border_type: BorderType::Rounded,
        }
    }
}
