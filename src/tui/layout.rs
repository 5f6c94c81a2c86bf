/// Responsive breakpoint system for TUI layout decisions.
///
/// Single source of truth for width thresholds - no magic numbers scattered in render code.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 70 cols: one label/value pair per line
    Compact,
    /// 70-119 cols: two pairs per line
    Normal,
    /// 120+ cols: three pairs per line
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=69 => Breakpoint::Compact,
            70..=119 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Label/value pairs per row in the receipt identity grid
    pub fn grid_columns(&self) -> usize {
        match self {
            Breakpoint::Compact => 1,
            Breakpoint::Normal => 2,
            Breakpoint::Wide => 3,
        }
    }

    /// Whether the results table has room for the mobile and session columns
    pub fn shows_all_result_columns(&self) -> bool {
        *self >= Breakpoint::Normal
    }
}
