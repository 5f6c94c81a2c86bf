//! Receipt export
//!
//! An `Exporter` turns a `ReceiptLayout` into file bytes. The layout is the
//! same tree the TUI draws, so the file mirrors what is on screen. `PdfExporter`
//! is the production implementation.

mod pdf;

pub use pdf::PdfExporter;

use crate::error::ExportError;
use crate::render::ReceiptLayout;
use std::path::{Path, PathBuf};

/// Produces a file from a rendered receipt
pub trait Exporter {
    fn export(&self, layout: &ReceiptLayout, admission_no: &str)
        -> Result<ExportedFile, ExportError>;
}

/// An exported document, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// `<admission_no>.pdf`, nothing added or removed
pub fn export_filename(admission_no: &str) -> String {
    format!("{}.pdf", admission_no)
}

impl ExportedFile {
    /// Write into `dir` (created if missing) and return the full path.
    ///
    /// The filename is used as-is; names that would leave `dir` are refused.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let stem = self.filename.trim_end_matches(".pdf");
        if stem.is_empty() || self.filename.contains(['/', '\\', '\0']) {
            return Err(ExportError::InvalidFilename(self.filename.clone()));
        }

        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;

        tracing::info!("Saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Page size class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
}

impl PageFormat {
    /// Parse format string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "letter" => Self::Letter,
            _ => Self::A4, // Default to A4 for unknown values
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A4 => "a4",
            Self::Letter => "letter",
        }
    }

    /// Width and height in millimetres (portrait)
    pub fn size_mm(&self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (215.9, 279.4),
        }
    }
}

/// Page geometry for export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Margin on every side, in inches
    pub margin_in: f32,
    pub page_format: PageFormat,
    /// Render scale relative to screen resolution. The PDF backend writes
    /// vector text, so this only matters for raster backends.
    pub scale: f32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            margin_in: 0.5,
            page_format: PageFormat::A4,
            scale: 2.0,
        }
    }
}

impl ExportSettings {
    pub fn margin_mm(&self) -> f32 {
        self.margin_in * 25.4
    }
}
