//! Terminal UI for Strictly Chess

mod app;
mod input;
mod ui;

pub use app::{Action, App};
pub use input::move_cursor;
pub use ui::{ScreenLayout, category_color, turn_label};

use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::{ClientConfig, GameClient, GameService, HttpGameService};

/// Runs the TUI client against the configured service.
pub async fn run_tui(config: ClientConfig) -> Result<()> {
    // Log to a file so output does not tear the alternate screen.
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %config.server_url(), "Starting Strictly Chess TUI");

    let client = GameClient::new(HttpGameService::new(&config)?);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let poller = config.poll_interval().map(|every| spawn_poller(client.clone(), every));

    let res = run_app(&mut terminal, client).await;

    if let Some(handle) = poller {
        handle.abort();
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    res
}

/// Draws, reads input and dispatches actions until the user quits.
///
/// Network work is spawned so the board stays clickable while requests are
/// in flight.
#[instrument(skip_all)]
async fn run_app<S: GameService + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: GameClient<S>,
) -> Result<()> {
    let mut app = App::new();
    let snapshots = client.subscribe();

    dispatch(&client, Action::Refresh);

    loop {
        let snapshot = snapshots.borrow().clone();
        let mut area = Rect::default();
        terminal.draw(|f| {
            area = f.area();
            ui::draw(f, &app, &snapshot);
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        let action = match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse, &ScreenLayout::new(area)),
            _ => None,
        };

        match action {
            Some(Action::Quit) => {
                info!("User quit");
                return Ok(());
            }
            Some(action) => dispatch(&client, action),
            None => {}
        }
    }
}

/// Runs an action on its own task. Nothing is awaited or deduplicated.
fn dispatch<S: GameService + 'static>(client: &GameClient<S>, action: Action) {
    debug!(?action, "Dispatching");
    let client = client.clone();
    match action {
        Action::Submit(cmd) => {
            tokio::spawn(async move { client.submit_move(cmd).await });
        }
        Action::Reset => {
            tokio::spawn(async move { client.reset_game().await });
        }
        Action::Refresh => {
            tokio::spawn(async move { client.fetch_state().await });
        }
        Action::Quit => {}
    }
}

fn spawn_poller<S: GameService + 'static>(
    client: GameClient<S>,
    every: Duration,
) -> JoinHandle<()> {
    info!(interval_ms = every.as_millis() as u64, "Background refresh enabled");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately and the startup fetch covers it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            client.fetch_state().await;
        }
    })
}
