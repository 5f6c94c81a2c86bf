//! Error types
//!
//! Three layers:
//! - `ApiError`: what went wrong talking to the receipt service
//! - `ExportError`: what went wrong producing or writing a PDF
//! - `DeskError`: what the operator is told (collapses causes on purpose)

use std::fmt;

/// Errors from the receipt service transport
#[derive(Debug)]
pub enum ApiError {
    /// Connection, DNS, TLS or timeout failure
    Network(String),
    /// Service answered with a non-success status
    Status(u16),
    /// Response body was not the expected JSON
    Decode(String),
    /// The configured base URL cannot address the endpoint
    InvalidUrl(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status(code) => write!(f, "Service returned HTTP {}", code),
            Self::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            Self::InvalidUrl(msg) => write!(f, "Invalid API URL: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            Self::Status(status.as_u16())
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Errors from the PDF export step
#[derive(Debug)]
pub enum ExportError {
    /// The PDF writer rejected the document
    Pdf(String),
    /// Writing the file failed
    Io(std::io::Error),
    /// Filename would escape the output directory
    InvalidFilename(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf(msg) => write!(f, "PDF generation failed: {}", msg),
            Self::Io(e) => write!(f, "Could not write PDF: {}", e),
            Self::InvalidFilename(name) => write!(f, "Refusing to write '{}'", name),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<printpdf::Error> for ExportError {
    fn from(e: printpdf::Error) -> Self {
        Self::Pdf(e.to_string())
    }
}

impl From<printpdf::lopdf::Error> for ExportError {
    fn from(e: printpdf::lopdf::Error) -> Self {
        Self::Pdf(e.to_string())
    }
}

/// Operator-facing failures.
///
/// Network, not-found and server errors are deliberately indistinguishable
/// here; the cause goes to the log instead.
#[derive(Debug)]
pub enum DeskError {
    /// Query was blank after trimming (never shown)
    EmptyQuery,
    /// Search request failed for any reason
    SearchFailed,
    /// Receipt fetch failed for any reason
    ReceiptNotFound,
    /// PDF could not be produced or saved
    ExportFailed(ExportError),
    /// Export requested with nothing selected
    NoSelection,
}

impl DeskError {
    /// Whether the operator should see a blocking notice for this error
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::EmptyQuery)
    }
}

impl fmt::Display for DeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuery => write!(f, "Nothing to search for"),
            Self::SearchFailed => write!(f, "Search failed"),
            Self::ReceiptNotFound => write!(f, "Receipt not found"),
            Self::ExportFailed(e) => write!(f, "Export failed: {}", e),
            Self::NoSelection => write!(f, "No receipt selected"),
        }
    }
}

impl std::error::Error for DeskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ExportFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ExportError> for DeskError {
    fn from(e: ExportError) -> Self {
        Self::ExportFailed(e)
    }
}
