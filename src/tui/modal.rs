// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Scroll up in content
    ScrollUp,
    /// Scroll down in content
    ScrollDown,
    /// Page up vertically
    PageUp,
    /// Page down vertically
    PageDown,
    /// Jump to oldest entry
    ScrollTop,
    /// Jump to newest entry
    ScrollBottom,
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Help overlay - shows keyboard shortcuts
    Help,
    /// Blocking notice ("Search failed", "Receipt not found", ...)
    /// Stays up until acknowledged
    Notice(String),
    /// Recent log entries, newest last
    Logs,
}

impl Modal {
    /// Create a help modal
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Modal::Notice(message.into())
    }

    pub fn logs() -> Self {
        Modal::Logs
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Notice(_) => match key {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Logs => match key {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('L') => ModalAction::Close,
                KeyCode::Up | KeyCode::Char('k') => ModalAction::ScrollUp,
                KeyCode::Down | KeyCode::Char('j') => ModalAction::ScrollDown,
                KeyCode::PageUp => ModalAction::PageUp,
                KeyCode::PageDown => ModalAction::PageDown,
                KeyCode::Home => ModalAction::ScrollTop,
                KeyCode::End => ModalAction::ScrollBottom,
                _ => ModalAction::None,
            },
        }
    }

    /// Title for the overlay frame
    pub fn title(&self) -> &'static str {
        match self {
            Modal::Help => " Help ",
            Modal::Notice(_) => " Notice ",
            Modal::Logs => " Logs ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_needs_acknowledgement() {
        let mut modal = Modal::notice("Search failed");
        assert_eq!(modal.handle_input(KeyCode::Char('x')), ModalAction::None);
        assert_eq!(modal.handle_input(KeyCode::Char('q')), ModalAction::None);
        assert_eq!(modal.handle_input(KeyCode::Enter), ModalAction::Close);
    }

    #[test]
    fn logs_scroll() {
        let mut modal = Modal::logs();
        assert_eq!(modal.handle_input(KeyCode::Up), ModalAction::ScrollUp);
        assert_eq!(modal.handle_input(KeyCode::End), ModalAction::ScrollBottom);
        assert_eq!(modal.handle_input(KeyCode::Esc), ModalAction::Close);
    }
}
