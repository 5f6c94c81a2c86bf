// Startup module - displays banner and configuration summary
//
// The banner is printed before the TUI takes over the screen (or in headless
// mode); the same summary is written to the log so it shows up in the TUI
// log modal.

use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// One line of the startup summary
struct Setting {
    name: &'static str,
    value: String,
}

fn settings(config: &Config) -> Vec<Setting> {
    let export = &config.export;
    let mut settings = vec![
        Setting {
            name: "service",
            value: config.api_base.clone(),
        },
        Setting {
            name: "timeout",
            value: format!("{}s", config.request_timeout_secs),
        },
        Setting {
            name: "export",
            value: format!(
                "{} ({}, {}in margin, scale {})",
                export.output_dir.display(),
                export.settings.page_format.as_str(),
                export.settings.margin_in,
                export.settings.scale
            ),
        },
        Setting {
            name: "institution",
            value: config.institution.name.clone(),
        },
    ];

    if config.logging.file_enabled {
        settings.push(Setting {
            name: "log files",
            value: format!(
                "{}/{}.* ({})",
                config.logging.file_dir.display(),
                config.logging.file_prefix,
                config.logging.file_rotation.as_str()
            ),
        });
    }

    settings
}

/// Print the startup banner
pub fn print_startup(config: &Config) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}feedesk{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Fee receipt lookup and export{RESET}");
    println!();

    // Config file status
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    for setting in settings(config) {
        println!(
            "    {MAGENTA}▸{RESET} {:<12} {DIM}{}{RESET}",
            setting.name, setting.value
        );
    }
    println!();
}

/// Write the startup summary to the log
pub fn log_startup(config: &Config) {
    tracing::info!("feedesk v{}", VERSION);
    for setting in settings(config) {
        tracing::info!("  {} - {}", setting.name, setting.value);
    }
    tracing::info!("Ready. Type a name, admission number or phone and press Enter");
}
