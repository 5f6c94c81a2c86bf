// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the interactive TUI runs. Subcommands:
// - export <admission_no>: fetch one receipt and save it as a PDF
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults

use crate::api::ReceiptClient;
use crate::config::{Config, VERSION};
use crate::export::PdfExporter;
use crate::session::Session;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// feedesk - fee receipt lookup and PDF export
#[derive(Parser)]
#[command(name = "feedesk")]
#[command(version = VERSION)]
#[command(about = "Look up fee receipts and export them as PDF", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a receipt by admission number and save it as <admission_no>.pdf
    Export {
        /// Admission number of the student
        admission_no: String,

        /// Output directory (defaults to [export].output_dir)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Export
// ─────────────────────────────────────────────────────────────────────────────

/// Headless export: the same search-free pipeline the TUI runs on `d`
pub async fn run_export(config: &Config, admission_no: &str, out: Option<PathBuf>) -> Result<PathBuf> {
    let client = ReceiptClient::new(&config.api_base, config.request_timeout())
        .with_context(|| format!("Invalid api_base {:?}", config.api_base))?;

    let mut session = Session::new();
    let request = session.open(admission_no.trim());
    let result = client.receipt(&request.admission_no).await;
    session
        .complete_load(request.token, result)
        .with_context(|| format!("Admission No {:?}", request.admission_no))?;

    let exporter = PdfExporter::new(config.export.settings.clone());
    let file = session.export(&exporter, &config.institution)?;

    let dir = out.unwrap_or_else(|| config.export.output_dir.clone());
    let path = file
        .save_to(&dir)
        .with_context(|| format!("Saving {} to {}", file.filename, dir.display()))?;

    tracing::info!("Exported {} ({} bytes)", path.display(), file.bytes.len());
    Ok(path)
}

// ─────────────────────────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────────────────────────

/// Handle `feedesk config`
pub fn handle_config(show: bool, path: bool, reset: bool) {
    if path {
        handle_config_path();
    } else if show {
        handle_config_show();
    } else if reset {
        handle_config_reset();
    } else {
        // No flag provided, show help
        println!("Usage: feedesk config [--show|--path|--reset]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --path    Show config file path");
        println!("  --reset   Reset config file to defaults");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    // Write the default config (using Config's single source of truth)
    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}
