//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Quote a string as a TOML basic string
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        let address_lines = toml::Value::Array(
            self.institution
                .address_lines
                .iter()
                .cloned()
                .map(toml::Value::String)
                .collect(),
        );

        format!(
            r#"# feedesk configuration

# Receipt service base URL (FEEDESK_API_BASE overrides)
api_base = {api_base}

# Seconds before a search or receipt request is abandoned
request_timeout_secs = {timeout}

# PDF export
[export]
# Directory PDFs are saved to (FEEDESK_EXPORT_DIR overrides)
output_dir = {output_dir}
# Margin on every side, in inches (0 to 2)
margin_in = {margin:?}
# Page format: a4, letter
page_format = "{page_format}"
# Render scale for raster backends
scale = {scale:?}

# Header printed on every receipt
[institution]
name = {name}
address_lines = {address_lines}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to TUI buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            api_base = quoted(&self.api_base),
            timeout = self.request_timeout_secs,
            output_dir = quoted(&self.export.output_dir.display().to_string()),
            margin = self.export.settings.margin_in,
            page_format = self.export.settings.page_format.as_str(),
            scale = self.export.settings.scale,
            name = quoted(&self.institution.name),
            address_lines = address_lines,
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
