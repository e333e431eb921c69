//! Command-line interface for strictly_chess.

use clap::{Parser, Subcommand};

/// Strictly Chess - terminal client for a remote chess rules service
#[derive(Parser, Debug)]
#[command(name = "strictly_chess")]
#[command(about = "Play chess against a server-authoritative rules engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (optional)
    #[arg(short, long, global = true, default_value = strictly_chess::DEFAULT_CONFIG_FILE)]
    pub config: std::path::PathBuf,

    /// Rules service origin, e.g. http://127.0.0.1:5000 (overrides config and environment)
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the terminal UI
    Play {
        /// Refresh the board in the background every N milliseconds
        #[arg(long)]
        poll_interval_ms: Option<u64>,
    },

    /// Fetch the board once and print it
    Board,

    /// Submit a single move token such as e2e4 or e7e8q
    Move {
        /// Move token: origin square, destination square, optional promotion letter
        token: strictly_chess::MoveCommand,
    },

    /// Start a new game and print the fresh board
    Reset,
}
