//! Clipboard access for copying receipts as text
//!
//! The system clipboard (`arboard`) sits behind `ClipboardSink` so the app
//! can be driven in tests without a display server.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Somewhere copied text goes
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard
///
/// A fresh `arboard::Clipboard` is created per copy so nothing is held
/// between copies.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    /// Common failure cases: no display server (headless Linux), permission denied.
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
        clipboard
            .set_text(text)
            .context("Failed to set clipboard text")?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records copies instead of touching the OS clipboard
    #[derive(Default, Clone)]
    pub struct MemoryClipboard {
        pub copied: Rc<RefCell<Vec<String>>>,
    }

    impl ClipboardSink for MemoryClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    /// Always fails, like a headless session
    pub struct BrokenClipboard;

    impl ClipboardSink for BrokenClipboard {
        fn set_text(&mut self, _text: &str) -> Result<()> {
            anyhow::bail!("no display")
        }
    }
}
