//! Search lifecycle: Idle → Searching → Success | Failed

use super::RequestToken;

/// Search state machine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    /// A search is in flight; only the completion carrying this token counts
    Searching(RequestToken),
    /// Last search returned (possibly zero) results
    Success,
    /// Last search failed
    Failed,
}

/// Owns the submitted query and the search state
#[derive(Debug, Default)]
pub struct QueryController {
    /// Trimmed query of the latest accepted search
    query: String,
    state: SearchState,
}

impl QueryController {
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    #[cfg(test)]
    pub fn is_searching(&self) -> bool {
        matches!(self.state, SearchState::Searching(_))
    }

    /// Accept a query if it is non-blank after trimming.
    ///
    /// Returns the trimmed query to send, or `None` (state untouched) for a
    /// blank query.
    pub(super) fn begin(&mut self, raw: &str, token: RequestToken) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.query = trimmed.to_string();
        self.state = SearchState::Searching(token);
        Some(self.query.clone())
    }

    /// Whether a completion with `token` answers the search currently in flight
    pub(super) fn is_current(&self, token: RequestToken) -> bool {
        self.state == SearchState::Searching(token)
    }

    pub(super) fn succeed(&mut self) {
        self.state = SearchState::Success;
    }

    pub(super) fn fail(&mut self) {
        self.state = SearchState::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_is_ignored() {
        let mut qc = QueryController::default();
        assert_eq!(qc.begin("   \t", RequestToken(1)), None);
        assert_eq!(qc.state(), &SearchState::Idle);
        assert_eq!(qc.query(), "");
    }

    #[test]
    fn query_is_trimmed() {
        let mut qc = QueryController::default();
        assert_eq!(qc.begin("  1001 ", RequestToken(1)).as_deref(), Some("1001"));
        assert_eq!(qc.state(), &SearchState::Searching(RequestToken(1)));
        assert!(qc.is_current(RequestToken(1)));
        assert!(!qc.is_current(RequestToken(2)));
    }

    #[test]
    fn search_can_restart_from_any_terminal_state() {
        let mut qc = QueryController::default();
        qc.begin("a", RequestToken(1));
        qc.fail();
        assert_eq!(qc.state(), &SearchState::Failed);

        qc.begin("b", RequestToken(2));
        qc.succeed();
        assert_eq!(qc.state(), &SearchState::Success);

        qc.begin("c", RequestToken(3));
        assert!(qc.is_searching());
    }
}
