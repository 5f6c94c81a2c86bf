// TUI components
//
// Each component renders one region of the screen from App state.

pub mod formatters;
pub mod receipt_view;
pub mod results_table;
pub mod search_box;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use receipt_view::render as render_receipt_view;
pub use results_table::render as render_results_table;
pub use search_box::render as render_search_box;
pub use status_bar::render as render_status_bar;
pub use title_bar::render as render_title;
