// TUI application state
//
// App wraps the Session with everything that only matters on screen: the
// search input line, which row is highlighted, overlays, and the exporter.
// It never talks to the network; remote calls leave as `Request`s and come
// back as `ApiEvent`s through the event loop.

use super::clipboard::{ClipboardSink, SystemClipboard};
use super::components::toast::Toast;
use super::modal::{Modal, ModalAction};
use super::theme::Theme;
use crate::config::Config;
use crate::error::{ApiError, DeskError};
use crate::export::PdfExporter;
use crate::logging::LogBuffer;
use crate::model::ReceiptRecord;
use crate::render::{render_receipt, Institution, ReceiptLayout};
use crate::session::{
    Completion, LoadRequest, LoadState, RequestToken, ResultSet, SearchRequest, SearchState,
    Session,
};
use std::path::PathBuf;

/// Spinner frames for the busy indicator
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Rows moved by PageUp/PageDown
const PAGE: usize = 10;

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Typing into the search box
    #[default]
    Search,
    /// Navigating the result list or the open receipt
    Content,
}

/// A remote call the event loop must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Search(SearchRequest),
    Load(LoadRequest),
}

/// Completion of a remote call, sent back to the event loop
#[derive(Debug)]
pub enum ApiEvent {
    SearchDone {
        token: RequestToken,
        result: Result<ResultSet, ApiError>,
    },
    ReceiptDone {
        token: RequestToken,
        result: Result<ReceiptRecord, ApiError>,
    },
}

/// Main application state for the TUI
pub struct App {
    pub session: Session,

    /// Text in the search box
    pub input: String,

    pub focus: Focus,

    /// Highlighted row in the result list
    pub selected_row: usize,

    /// Vertical scroll of the receipt view
    pub receipt_scroll: u16,

    /// Active overlay, if any
    pub modal: Option<Modal>,

    /// Lines scrolled up from the newest entry in the log modal
    pub log_scroll: usize,

    /// Transient confirmation in the bottom-right corner
    pub toast: Option<Toast>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Log buffer for the status bar and log modal
    pub log_buffer: LogBuffer,

    pub theme: Theme,

    /// Receipt header boilerplate
    pub institution: Institution,

    /// Where downloads are saved
    pub output_dir: PathBuf,

    exporter: PdfExporter,
    clipboard: Box<dyn ClipboardSink>,
    spinner_frame: usize,
}

impl App {
    pub fn with_config(log_buffer: LogBuffer, config: &Config) -> Self {
        Self {
            session: Session::new(),
            input: String::new(),
            focus: Focus::Search,
            selected_row: 0,
            receipt_scroll: 0,
            modal: None,
            log_scroll: 0,
            toast: None,
            should_quit: false,
            log_buffer,
            theme: Theme::default(),
            institution: config.institution.clone(),
            output_dir: config.export.output_dir.clone(),
            exporter: PdfExporter::new(config.export.settings.clone()),
            clipboard: Box::new(SystemClipboard),
            spinner_frame: 0,
        }
    }

    /// Swap the clipboard backend
    #[cfg(test)]
    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = clipboard;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Search for the text in the input line
    pub fn submit_search(&mut self) -> Option<Request> {
        match self.session.search(&self.input) {
            Ok(request) => {
                self.selected_row = 0;
                self.receipt_scroll = 0;
                Some(Request::Search(request))
            }
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    /// Load the receipt behind the highlighted row
    pub fn open_selected(&mut self) -> Option<Request> {
        let admission_no = self
            .session
            .visible_results()
            .get(self.selected_row)?
            .admission_no
            .clone();
        Some(Request::Load(self.session.open(&admission_no)))
    }

    /// Feed a remote completion into the session
    pub fn apply(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::SearchDone { token, result } => {
                match self.session.complete_search(token, result) {
                    Ok(Completion::Applied) => {
                        self.selected_row = 0;
                        if !self.session.visible_results().is_empty() {
                            self.focus = Focus::Content;
                        }
                    }
                    Ok(Completion::Stale) => {}
                    Err(e) => self.report(e),
                }
            }
            ApiEvent::ReceiptDone { token, result } => {
                match self.session.complete_load(token, result) {
                    Ok(Completion::Applied) => {
                        self.receipt_scroll = 0;
                        self.focus = Focus::Content;
                    }
                    Ok(Completion::Stale) => {}
                    Err(e) => self.report(e),
                }
            }
        }
    }

    /// Return from the receipt to the list it was opened from
    pub fn back(&mut self) {
        if !self.session.back() {
            self.focus = Focus::Search;
        }
    }

    /// Layout of the open receipt
    pub fn receipt_layout(&self) -> Option<ReceiptLayout> {
        self.session
            .selected()
            .map(|record| render_receipt(record, &self.institution))
    }

    /// Save the open receipt as `<admission_no>.pdf` in the output directory
    pub fn download(&mut self) {
        let saved = self
            .session
            .export(&self.exporter, &self.institution)
            .and_then(|file| file.save_to(&self.output_dir).map_err(DeskError::from));

        match saved {
            Ok(path) => {
                tracing::info!("Saved {}", path.display());
                self.show_toast(format!("✓ Saved {}", path.display()));
            }
            Err(DeskError::NoSelection) => self.show_toast("Open a receipt first"),
            Err(e) => {
                tracing::error!("{}", e);
                self.report(e);
            }
        }
    }

    /// Copy the open receipt to the clipboard as plain text
    pub fn copy_receipt(&mut self) {
        let Some(layout) = self.receipt_layout() else {
            self.show_toast("Open a receipt first");
            return;
        };

        match self.clipboard.set_text(&layout.to_plain_text()) {
            Ok(()) => self.show_toast("✓ Copied to clipboard"),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                self.show_toast("✗ Failed to copy");
            }
        }
    }

    /// Surface an operator-facing error as a blocking notice
    fn report(&mut self, error: DeskError) {
        if error.is_silent() {
            return;
        }
        self.modal = Some(Modal::notice(error.to_string()));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    pub fn page_down(&mut self) {
        self.move_selection(PAGE as isize);
    }

    pub fn page_up(&mut self) {
        self.move_selection(-(PAGE as isize));
    }

    fn move_selection(&mut self, delta: isize) {
        if self.session.selected().is_some() {
            let scroll = self.receipt_scroll as isize + delta;
            self.receipt_scroll = scroll.clamp(0, u16::MAX as isize) as u16;
            return;
        }

        let len = self.session.visible_results().len();
        if len == 0 {
            self.selected_row = 0;
            return;
        }
        let row = self.selected_row as isize + delta;
        self.selected_row = row.clamp(0, len as isize - 1) as usize;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.log_scroll = 0;
    }

    /// Apply a modal's action; the log modal is the only scrollable one
    pub fn apply_modal_action(&mut self, action: ModalAction) {
        let newest_first_limit = self.log_buffer.len().saturating_sub(1);
        match action {
            ModalAction::None => {}
            ModalAction::Close => self.close_modal(),
            ModalAction::ScrollUp => self.log_scroll = (self.log_scroll + 1).min(newest_first_limit),
            ModalAction::ScrollDown => self.log_scroll = self.log_scroll.saturating_sub(1),
            ModalAction::PageUp => {
                self.log_scroll = (self.log_scroll + PAGE).min(newest_first_limit)
            }
            ModalAction::PageDown => self.log_scroll = self.log_scroll.saturating_sub(PAGE),
            ModalAction::ScrollTop => self.log_scroll = newest_first_limit,
            ModalAction::ScrollBottom => self.log_scroll = 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Display helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Advance the spinner and drop an expired toast
    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.spinner_frame]
    }

    /// One-line description of outstanding work, if any
    pub fn activity(&self) -> Option<String> {
        if let SearchState::Searching(_) = self.session.search_state() {
            return Some(format!("Searching for {:?}", self.session.query()));
        }
        if let LoadState::Loading { admission_no, .. } = self.session.load_state() {
            return Some(format!("Loading receipt {}", admission_no));
        }
        None
    }
}
