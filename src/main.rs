//! Strictly Chess - Unified CLI
//!
//! Terminal client for a remote chess rules service.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_chess::{ClientConfig, ClientSnapshot, GameClient, HttpGameService, MoveCommand};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Play {
        poll_interval_ms: None,
    });

    if logs_to_stderr(&command) {
        init_tracing();
    }

    let mut config = ClientConfig::load(&cli.config)?;
    if let Some(url) = cli.server_url {
        config = config.with_server_url(url)?;
    }

    match command {
        Command::Play { poll_interval_ms } => {
            if poll_interval_ms.is_some() {
                config = config.with_poll_interval_ms(poll_interval_ms);
            }
            strictly_chess::tui::run_tui(config).await
        }
        Command::Board => run_board(config).await,
        Command::Move { token } => run_move(config, token).await,
        Command::Reset => run_reset(config).await,
    }
}

/// Headless commands log to stderr from the start, so config loading is
/// traced too. The TUI installs its own file subscriber once the config
/// names the log file.
fn logs_to_stderr(command: &Command) -> bool {
    !matches!(command, Command::Play { .. })
}

/// Logging for headless commands goes to stderr so stdout stays clean.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// Fetch the board once and print it
#[instrument(skip_all)]
async fn run_board(config: ClientConfig) -> Result<()> {
    let client = GameClient::new(HttpGameService::new(&config)?);
    client.fetch_state().await;
    report(&client.snapshot())
}

/// Submit one move and print what the service answered
#[instrument(skip_all, fields(token = %token))]
async fn run_move(config: ClientConfig, token: MoveCommand) -> Result<()> {
    let client = GameClient::new(HttpGameService::new(&config)?);
    info!("Submitting move from command line");
    client.submit_move(token).await;
    report(&client.snapshot())
}

/// Reset the game, which also fetches the new board
#[instrument(skip_all)]
async fn run_reset(config: ClientConfig) -> Result<()> {
    let client = GameClient::new(HttpGameService::new(&config)?);
    client.reset_game().await;
    report(&client.snapshot())
}

fn report(snapshot: &ClientSnapshot) -> Result<()> {
    match &snapshot.board {
        Some(state) => {
            println!("{}", state.board().display());
            println!();
            println!("{}", strictly_chess::tui::turn_label(snapshot));
        }
        None => println!("No board available from the server."),
    }
    if !snapshot.message.is_empty() {
        println!("[{}] {}", snapshot.category(), snapshot.message);
    }
    Ok(())
}
