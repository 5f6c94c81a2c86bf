// feedesk - Fee receipt lookup client
//
// Finds a student's fee receipt on the receipt service by name, admission
// number or phone, shows it, and saves it as a PDF.
//
// Architecture:
// - Transport (reqwest): GET /search and GET /receipt/adm/<no>
// - Session: synchronous state machine over search, receipt load and view
// - Render: receipt → layout tree shared by the TUI, PDF and clipboard
// - Export (printpdf): layout tree → <admission_no>.pdf
// - TUI (ratatui): keyboard-driven front end; remote calls run as tokio tasks

mod api;
mod cli;
mod config;
mod error;
mod export;
mod logging;
mod model;
mod render;
mod session;
mod startup;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use logging::LogBuffer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config management never touches the service or the log subscriber
    if let Some(Commands::Config { show, path, reset }) = cli.command {
        cli::handle_config(show, path, reset);
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();

    // Headless export logs to stdout
    if matches!(cli.command, Some(Commands::Export { .. })) {
        config.enable_tui = false;
    }

    // In TUI mode logs are captured to the buffer so they can't garble the display
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, config.enable_tui, &log_buffer);

    if let Some(Commands::Export { admission_no, out }) = cli.command {
        let path = cli::run_export(&config, &admission_no, out).await?;
        println!("{}", path.display());
        return Ok(());
    }

    let client = api::ReceiptClient::new(&config.api_base, config.request_timeout())
        .with_context(|| format!("Invalid api_base {:?}", config.api_base))?;

    startup::print_startup(&config);
    startup::log_startup(&config);

    if config.enable_tui {
        tracing::info!("Starting TUI");
        if let Err(e) = tui::run_tui(log_buffer, config, client).await {
            tracing::error!("TUI error: {:?}", e);
            return Err(e);
        }
    } else {
        tracing::info!("TUI disabled; use `feedesk export <admission_no>` for headless work");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
