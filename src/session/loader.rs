//! Receipt fetch lifecycle: Idle → Loading → Loaded | Failed

use super::RequestToken;

/// Receipt loader state machine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        token: RequestToken,
        admission_no: String,
    },
    Loaded,
    Failed,
}

#[derive(Debug, Default)]
pub struct ReceiptLoader {
    state: LoadState,
}

impl ReceiptLoader {
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    /// Any state → Loading
    pub(super) fn begin(&mut self, admission_no: &str, token: RequestToken) {
        self.state = LoadState::Loading {
            token,
            admission_no: admission_no.to_string(),
        };
    }

    pub(super) fn is_current(&self, token: RequestToken) -> bool {
        matches!(&self.state, LoadState::Loading { token: t, .. } if *t == token)
    }

    pub(super) fn succeed(&mut self) {
        self.state = LoadState::Loaded;
    }

    pub(super) fn fail(&mut self) {
        self.state = LoadState::Failed;
    }

    /// Forget an in-flight load so its completion is treated as stale
    pub(super) fn cancel(&mut self) {
        if self.is_loading() {
            self.state = LoadState::Idle;
        }
    }

    /// Back to Idle after the loaded receipt was dismissed
    pub(super) fn reset(&mut self) {
        self.state = LoadState::Idle;
    }
}
