// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, remote completions)
// - Spawning search and receipt requests as tokio tasks

pub mod app;
pub mod clipboard;
pub mod components;
pub mod layout;
pub mod modal;
pub mod theme;
pub mod ui;

use crate::api::ReceiptClient;
use crate::config::Config;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{ApiEvent, App, Focus, Request};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Completions waiting to be applied
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(log_buffer: LogBuffer, config: Config, client: ReceiptClient) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::with_config(log_buffer, &config);

    let result = run_event_loop(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Keyboard input
/// 2. Timer ticks (spinner, toast expiry, new log lines)
/// 3. Completions of spawned search and receipt requests
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &ReceiptClient,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<ApiEvent>(EVENT_CHANNEL_CAPACITY);
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        if let Some(request) = handle_key_event(app, key_event) {
                            spawn_request(client, &tx, request);
                        }
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(api_event) = rx.recv() => {
                app.apply(api_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Perform a remote call off the event loop and report back through `tx`
fn spawn_request(client: &ReceiptClient, tx: &mpsc::Sender<ApiEvent>, request: Request) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let event = match request {
            Request::Search(req) => ApiEvent::SearchDone {
                token: req.token,
                result: client.search(&req.query).await,
            },
            Request::Load(req) => ApiEvent::ReceiptDone {
                token: req.token,
                result: client.receipt(&req.admission_no).await,
            },
        };
        // Receiver is gone only after the TUI quit
        let _ = tx.send(event).await;
    });
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global → Search box or content
///
/// Returns a remote call to start, if the key triggered one.
fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Option<Request> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Layer 1: Modal captures all input when active
    if let Some(modal) = app.modal.as_mut() {
        let action = modal.handle_input(key_event.code);
        app.apply_modal_action(action);
        return None;
    }

    // Layer 2: Global keys
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        app.should_quit = true;
        return None;
    }

    match app.focus {
        Focus::Search => handle_search_keys(app, key_event),
        Focus::Content => handle_content_keys(app, key_event),
    }
}

/// Keys while typing a query
fn handle_search_keys(app: &mut App, key_event: KeyEvent) -> Option<Request> {
    match key_event.code {
        KeyCode::Enter => return app.submit_search(),
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Down | KeyCode::Tab => {
            if app.session.selected().is_some() || !app.session.visible_results().is_empty() {
                app.focus = Focus::Content;
            }
        }
        KeyCode::Esc => {
            if app.session.selected().is_some() {
                app.focus = Focus::Content;
            } else if !app.input.is_empty() {
                app.input.clear();
            }
        }
        _ => {}
    }
    None
}

/// Keys while navigating the list or an open receipt
fn handle_content_keys(app: &mut App, key_event: KeyEvent) -> Option<Request> {
    let showing_receipt = app.session.selected().is_some();

    match key_event.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.modal = Some(modal::Modal::help()),
        KeyCode::Char('L') => app.modal = Some(modal::Modal::logs()),
        KeyCode::Char('/') | KeyCode::Tab => app.focus = Focus::Search,

        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown => app.page_down(),

        KeyCode::Enter if !showing_receipt => return app.open_selected(),
        KeyCode::Char('d') if showing_receipt => app.download(),
        KeyCode::Char('y') if showing_receipt => app.copy_receipt(),
        KeyCode::Esc | KeyCode::Backspace => app.back(),
        _ => {}
    }
    None
}
