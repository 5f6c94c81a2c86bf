//! Export configuration: output directory and page geometry

use crate::export::{ExportSettings, PageFormat};
use serde::Deserialize;
use std::path::PathBuf;

/// Widest margin that still leaves room for a receipt on the smallest page
const MAX_MARGIN_IN: f32 = 2.0;

/// Where and how receipts are exported
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory PDFs are written to
    pub output_dir: PathBuf,
    pub settings: ExportSettings,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            settings: ExportSettings::default(),
        }
    }
}

/// Export settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileExport {
    pub output_dir: Option<String>,
    pub margin_in: Option<f32>,
    pub page_format: Option<String>,
    pub scale: Option<f32>,
}

impl ExportConfig {
    /// Create from file config with defaults
    ///
    /// Margins outside 0..=MAX_MARGIN_IN and non-positive scales fall back
    /// to the defaults.
    pub fn from_file(file: Option<FileExport>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            output_dir: file
                .output_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            settings: ExportSettings {
                margin_in: file
                    .margin_in
                    .filter(|m| (0.0..=MAX_MARGIN_IN).contains(m))
                    .unwrap_or(defaults.settings.margin_in),
                page_format: file
                    .page_format
                    .map(|s| PageFormat::from_str(&s))
                    .unwrap_or(defaults.settings.page_format),
                scale: file
                    .scale
                    .filter(|s| *s > 0.0)
                    .unwrap_or(defaults.settings.scale),
            },
        }
    }
}
