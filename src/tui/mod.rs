pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::error::Elapsed;

use crate::feed::{FeedClient, FeedError};
use crate::fetch::Dataset;

/// Slack allowed past the client's own request timeout before a background
/// fetch is abandoned
const FETCH_GRACE: Duration = Duration::from_secs(5);

type FetchOutcome = Result<Result<Dataset, FeedError>, Elapsed>;
type FetchHandle = JoinHandle<FetchOutcome>;

/// Hard deadline for one background fetch. Always later than the client
/// timeout, so a slow feed normally surfaces as `FeedError::Timeout`.
fn fetch_deadline(client: &FeedClient) -> Duration {
    client.timeout() + FETCH_GRACE
}

fn spawn_fetch(client: &FeedClient) -> FetchHandle {
    let client = client.clone();
    let deadline = fetch_deadline(&client);
    tokio::spawn(async move {
        tokio::time::timeout(deadline, crate::fetch::fetch_dataset(&client)).await
    })
}

/// Collapse a joined fetch task into a single feed result
fn settle_fetch(
    joined: Result<FetchOutcome, JoinError>,
    deadline: Duration,
) -> Result<Dataset, FeedError> {
    match joined {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(_elapsed)) => Err(FeedError::Timeout(deadline)),
        Err(e) => {
            crate::buffered_eprintln!("Refresh task failed: {}", e);
            Err(FeedError::Task(e.to_string()))
        }
    }
}

pub async fn run_tui(mut app: App, client: FeedClient, start_with_mock: bool) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250, app.auto_refresh_interval);

    // At most one fetch is in flight at any time
    let mut pending_fetch: Option<FetchHandle> = None;
    if start_with_mock {
        app.start_with_mock();
    } else {
        pending_fetch = Some(spawn_fetch(&client));
        app.is_loading = true;
    }

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => {
                app.update_flash();
                app.advance_spinner();
            }
            Event::Refresh => {
                // Auto-refresh never interrupts mock mode or a pending fetch
                if !app.use_mock && pending_fetch.is_none() {
                    app.needs_refresh = true;
                }
            }
        }

        // Check if background fetch has completed
        if let Some(handle) = pending_fetch.take_if(|h| h.is_finished()) {
            let outcome = settle_fetch(handle.await, fetch_deadline(&client));
            app.finish_fetch(outcome);
        }

        // Spawn new refresh if needed and no fetch is pending
        if app.needs_refresh && pending_fetch.is_none() {
            app.needs_refresh = false;
            if !app.use_mock {
                pending_fetch = Some(spawn_fetch(&client));
                app.is_loading = true;
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

            // Filters
            KeyCode::Char('g') => app.cycle_gender(),
            KeyCode::Char('c') => app.cycle_category(),
            KeyCode::Char('x') => app.clear_filters(),

            KeyCode::Char('r') => {
                app.request_refresh();
            }
            KeyCode::Char('m') => app.toggle_mock(),

            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
