//! Receipt header boilerplate

use crate::render::Institution;
use serde::Deserialize;

/// Institution header as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileInstitution {
    pub name: Option<String>,
    pub address_lines: Option<Vec<String>>,
}

impl Institution {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileInstitution>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            name: file.name.unwrap_or(defaults.name),
            address_lines: file.address_lines.unwrap_or(defaults.address_lines),
        }
    }
}
