//! Session state: search, selection and the visible view
//!
//! The session is a synchronous state machine. It never performs I/O itself:
//! `search()` and `open()` hand back a request description carrying a
//! `RequestToken`, the caller performs the remote call however it likes, and
//! feeds the outcome back through `complete_search()` / `complete_load()`.
//!
//! ```text
//!   search("q") ──► SearchRequest ──► (remote) ──► complete_search(token, ..)
//!   open("1001") ─► LoadRequest ────► (remote) ──► complete_load(token, ..)
//! ```
//!
//! Completions whose token is not the one currently awaited are dropped, so a
//! slow response can never overwrite the state produced by a newer request.

mod loader;
mod query;

pub use loader::{LoadState, ReceiptLoader};
pub use query::{QueryController, SearchState};

use crate::error::{ApiError, DeskError};
use crate::export::{ExportedFile, Exporter};
use crate::model::{ReceiptRecord, SearchResultSummary};
use crate::render::{render_receipt, Institution};

/// Ordered search results exactly as returned by the service
pub type ResultSet = Vec<SearchResultSummary>;

/// Identifies one remote request; strictly increasing per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(pub(crate) u64);

/// What the operator is looking at.
///
/// The list and the receipt can never both be visible. While a receipt is
/// shown, the list it was opened from is kept so `back()` can restore it.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    List(ResultSet),
    Receipt {
        record: Box<ReceiptRecord>,
        list: ResultSet,
    },
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::List(Vec::new())
    }
}

/// A search the caller must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub token: RequestToken,
    pub query: String,
}

/// A receipt fetch the caller must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub token: RequestToken,
    pub admission_no: String,
}

/// Whether a completion changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request superseded this one; nothing changed
    Stale,
}

#[derive(Debug, Default)]
pub struct Session {
    query: QueryController,
    loader: ReceiptLoader,
    view: ViewState,
    last_token: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn search_state(&self) -> &SearchState {
        self.query.state()
    }

    pub fn load_state(&self) -> &LoadState {
        self.loader.state()
    }

    /// Trimmed text of the latest accepted query
    pub fn query(&self) -> &str {
        self.query.query()
    }

    /// A remote call is outstanding
    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.query.is_searching() || self.loader.is_loading()
    }

    /// Results of the list view, empty while a receipt is shown
    pub fn visible_results(&self) -> &[SearchResultSummary] {
        match &self.view {
            ViewState::List(results) => results,
            ViewState::Receipt { .. } => &[],
        }
    }

    /// The selected receipt, if the receipt view is active
    pub fn selected(&self) -> Option<&ReceiptRecord> {
        match &self.view {
            ViewState::Receipt { record, .. } => Some(&**record),
            ViewState::List(_) => None,
        }
    }

    fn next_token(&mut self) -> RequestToken {
        self.last_token += 1;
        RequestToken(self.last_token)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a search.
    ///
    /// A blank query is rejected with `EmptyQuery` and changes nothing.
    /// Otherwise the selection is dropped and any in-flight receipt load is
    /// abandoned.
    pub fn search(&mut self, raw: &str) -> Result<SearchRequest, DeskError> {
        if raw.trim().is_empty() {
            return Err(DeskError::EmptyQuery);
        }

        let token = self.next_token();
        let query = self.query.begin(raw, token).ok_or(DeskError::EmptyQuery)?;

        self.deselect();
        self.loader.cancel();

        tracing::debug!("Search {:?} started ({:?})", query, token);
        Ok(SearchRequest { token, query })
    }

    /// Apply the outcome of a search request
    pub fn complete_search(
        &mut self,
        token: RequestToken,
        result: Result<ResultSet, ApiError>,
    ) -> Result<Completion, DeskError> {
        if !self.query.is_current(token) {
            tracing::debug!("Dropping stale search response ({:?})", token);
            return Ok(Completion::Stale);
        }

        match result {
            Ok(results) => {
                tracing::info!(
                    "Search {:?} returned {} result(s)",
                    self.query.query(),
                    results.len()
                );
                self.query.succeed();
                self.replace_list(results);
                Ok(Completion::Applied)
            }
            Err(e) => {
                tracing::warn!("Search {:?} failed: {}", self.query.query(), e);
                self.query.fail();
                self.replace_list(Vec::new());
                Err(DeskError::SearchFailed)
            }
        }
    }

    /// Put `results` behind whatever is visible.
    ///
    /// A receipt opened while the search was in flight stays on screen; the
    /// new list is what `back()` returns to.
    fn replace_list(&mut self, results: ResultSet) {
        match &mut self.view {
            ViewState::List(list) | ViewState::Receipt { list, .. } => *list = results,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Receipt loading
    // ─────────────────────────────────────────────────────────────────────────

    /// Start loading the receipt for `admission_no`
    pub fn open(&mut self, admission_no: &str) -> LoadRequest {
        let token = self.next_token();
        self.loader.begin(admission_no, token);
        tracing::debug!("Loading receipt {} ({:?})", admission_no, token);
        LoadRequest {
            token,
            admission_no: admission_no.to_string(),
        }
    }

    /// Apply the outcome of a receipt fetch.
    ///
    /// Success switches to the receipt view. Failure leaves the list view
    /// exactly as it was.
    pub fn complete_load(
        &mut self,
        token: RequestToken,
        result: Result<ReceiptRecord, ApiError>,
    ) -> Result<Completion, DeskError> {
        if !self.loader.is_current(token) {
            tracing::debug!("Dropping stale receipt response ({:?})", token);
            return Ok(Completion::Stale);
        }

        match result {
            Ok(record) => {
                if record.total_mismatch() {
                    tracing::warn!(
                        "Receipt {}: fee_total {} differs from item sum {:?}; showing supplied total",
                        record.admission_no,
                        record.fee_total,
                        record.fee_items_sum()
                    );
                }
                tracing::info!("Opened receipt {}", record.admission_no);

                self.loader.succeed();
                let list = match std::mem::take(&mut self.view) {
                    ViewState::List(list) | ViewState::Receipt { list, .. } => list,
                };
                self.view = ViewState::Receipt {
                    record: Box::new(record),
                    list,
                };
                Ok(Completion::Applied)
            }
            Err(e) => {
                tracing::warn!("Receipt fetch failed: {}", e);
                self.loader.fail();
                Err(DeskError::ReceiptNotFound)
            }
        }
    }

    /// Leave the receipt view, restoring the list it was opened from.
    ///
    /// Returns false if no receipt was shown.
    pub fn back(&mut self) -> bool {
        if self.selected().is_none() {
            return false;
        }
        self.deselect();
        self.loader.reset();
        true
    }

    fn deselect(&mut self) {
        if let ViewState::Receipt { list, .. } = std::mem::take(&mut self.view) {
            self.view = ViewState::List(list);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Render the selected receipt and hand the layout to `exporter`
    pub fn export<E: Exporter>(
        &self,
        exporter: &E,
        institution: &Institution,
    ) -> Result<ExportedFile, DeskError> {
        let record = self.selected().ok_or(DeskError::NoSelection)?;
        let layout = render_receipt(record, institution);
        Ok(exporter.export(&layout, &record.admission_no)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::export_filename;
    use crate::error::ExportError;
    use crate::model::fixtures::{receipt, summary};
    use crate::render::ReceiptLayout;

    fn searched(results: ResultSet) -> Session {
        let mut session = Session::new();
        let req = session.search("kaur").unwrap();
        session.complete_search(req.token, Ok(results)).unwrap();
        session
    }

    fn opened(adm: &str) -> Session {
        let mut session = searched(vec![summary(adm, "Simran Kaur")]);
        let req = session.open(adm);
        session.complete_load(req.token, Ok(receipt(adm))).unwrap();
        session
    }

    /// Records what it was asked to export
    struct LayoutEcho;

    impl Exporter for LayoutEcho {
        fn export(
            &self,
            layout: &ReceiptLayout,
            admission_no: &str,
        ) -> Result<ExportedFile, ExportError> {
            Ok(ExportedFile {
                filename: export_filename(admission_no),
                bytes: layout.to_plain_text().into_bytes(),
            })
        }
    }

    #[test]
    fn blank_search_changes_nothing() {
        let mut session = searched(vec![summary("1001", "A")]);
        let before = session.view().clone();

        for blank in ["", "   ", "\t\n"] {
            assert!(matches!(session.search(blank), Err(DeskError::EmptyQuery)));
        }
        assert_eq!(session.view(), &before);
        assert_eq!(session.search_state(), &SearchState::Success);
        assert!(!session.is_busy());

        // Also with a receipt selected
        let mut session = opened("1001");
        assert!(session.search("  ").is_err());
        assert!(session.selected().is_some());
    }

    #[test]
    fn successful_search_keeps_service_order() {
        let rows = vec![summary("3", "C"), summary("1", "A"), summary("2", "B"), summary("1", "A")];
        let session = searched(rows.clone());
        assert_eq!(session.visible_results(), rows.as_slice());
        assert_eq!(session.search_state(), &SearchState::Success);
        assert_eq!(session.query(), "kaur");
    }

    #[test]
    fn empty_result_is_success() {
        let session = searched(Vec::new());
        assert_eq!(session.search_state(), &SearchState::Success);
        assert!(session.visible_results().is_empty());
    }

    #[test]
    fn failed_search_clears_list() {
        let mut session = searched(vec![summary("1001", "A")]);
        let req = session.search("other").unwrap();
        let outcome = session.complete_search(req.token, Err(ApiError::Status(500)));

        assert!(matches!(outcome, Err(DeskError::SearchFailed)));
        assert_eq!(session.search_state(), &SearchState::Failed);
        assert!(session.visible_results().is_empty());
        assert!(session.selected().is_none());
    }

    #[test]
    fn search_deselects() {
        let mut session = opened("1001");
        assert!(session.selected().is_some());

        session.search("1002").unwrap();
        assert!(session.selected().is_none());
        // List shown while searching is the one the receipt was opened from
        assert_eq!(session.visible_results().len(), 1);
        assert!(session.is_busy());
    }

    #[test]
    fn open_success_switches_to_receipt() {
        let session = opened("1001");
        assert_eq!(session.selected().map(|r| r.admission_no.as_str()), Some("1001"));
        assert!(session.visible_results().is_empty());
        assert_eq!(session.load_state(), &LoadState::Loaded);
    }

    #[test]
    fn open_failure_keeps_list() {
        let mut session = searched(vec![summary("1001", "A"), summary("1002", "B")]);
        let before = session.view().clone();

        let req = session.open("9999");
        let outcome = session.complete_load(req.token, Err(ApiError::Status(404)));

        assert!(matches!(outcome, Err(DeskError::ReceiptNotFound)));
        assert_eq!(session.view(), &before);
        assert!(session.selected().is_none());
        assert_eq!(session.load_state(), &LoadState::Failed);
    }

    #[test]
    fn back_restores_list() {
        let mut session = opened("1001");
        assert!(session.back());
        assert_eq!(session.visible_results().len(), 1);
        assert_eq!(session.load_state(), &LoadState::Idle);
        assert!(!session.back());
    }

    #[test]
    fn stale_search_response_is_dropped() {
        let mut session = Session::new();
        let first = session.search("first").unwrap();
        let second = session.search("second").unwrap();
        assert!(second.token > first.token);

        let fresh = vec![summary("2", "Second")];
        session.complete_search(second.token, Ok(fresh.clone())).unwrap();

        // The slow first response arrives last
        let outcome = session.complete_search(first.token, Ok(vec![summary("1", "First")]));
        assert_eq!(outcome.unwrap(), Completion::Stale);
        assert_eq!(session.visible_results(), fresh.as_slice());

        // Stale failures are dropped too
        let outcome = session.complete_search(first.token, Err(ApiError::Status(500)));
        assert_eq!(outcome.unwrap(), Completion::Stale);
        assert_eq!(session.search_state(), &SearchState::Success);
    }

    #[test]
    fn stale_receipt_response_is_dropped() {
        let mut session = searched(vec![summary("1001", "A"), summary("1002", "B")]);
        let first = session.open("1001");
        let second = session.open("1002");

        session.complete_load(second.token, Ok(receipt("1002"))).unwrap();
        let outcome = session.complete_load(first.token, Ok(receipt("1001")));

        assert_eq!(outcome.unwrap(), Completion::Stale);
        assert_eq!(session.selected().unwrap().admission_no, "1002");
    }

    #[test]
    fn new_search_abandons_pending_load() {
        let mut session = searched(vec![summary("1001", "A")]);
        let load = session.open("1001");
        let search = session.search("other").unwrap();

        let outcome = session.complete_load(load.token, Ok(receipt("1001")));
        assert_eq!(outcome.unwrap(), Completion::Stale);
        assert!(session.selected().is_none());

        session.complete_search(search.token, Ok(Vec::new())).unwrap();
        assert_eq!(session.search_state(), &SearchState::Success);
    }

    #[test]
    fn receipt_opened_during_search_stays_visible() {
        let mut session = searched(vec![summary("1001", "A")]);
        let search = session.search("again").unwrap();
        // Search clears the selection, so opening happens from the old list
        let load = session.open("1001");
        session.complete_load(load.token, Ok(receipt("1001"))).unwrap();

        let fresh = vec![summary("1005", "E")];
        session.complete_search(search.token, Ok(fresh.clone())).unwrap();

        assert!(session.selected().is_some());
        session.back();
        assert_eq!(session.visible_results(), fresh.as_slice());
    }

    #[test]
    fn mismatched_total_still_loads() {
        let mut session = searched(vec![summary("1001", "A")]);
        let mut record = receipt("1001");
        record.fee_total = crate::model::Amount::from(1);

        let req = session.open("1001");
        assert_eq!(session.complete_load(req.token, Ok(record)).unwrap(), Completion::Applied);
        assert_eq!(session.selected().unwrap().fee_total.to_string(), "1");
    }

    #[test]
    fn export_requires_selection() {
        let session = searched(vec![summary("1001", "A")]);
        let result = session.export(&LayoutEcho, &Institution::default());
        assert!(matches!(result, Err(DeskError::NoSelection)));
    }

    #[test]
    fn export_is_stable_for_fixed_selection() {
        let session = opened("1001");
        let institution = Institution::default();

        let first = session.export(&LayoutEcho, &institution).unwrap();
        let second = session.export(&LayoutEcho, &institution).unwrap();
        assert_eq!(first.filename, "1001.pdf");
        assert_eq!(first, second);

        // A different selection produces a different file
        let other = opened("1002").export(&LayoutEcho, &institution).unwrap();
        assert_eq!(other.filename, "1002.pdf");
        assert_ne!(other.bytes, first.bytes);
    }
}
