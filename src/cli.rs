//! Command-line interface for strictly_lines.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_lines::Overrides;

/// Strictly Lines - N-in-a-row against a heuristic engine
#[derive(Parser, Debug)]
#[command(name = "strictly_lines")]
#[command(about = "N-in-a-row tic-tac-toe on configurable boards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML game config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the engine on the console
    Play {
        /// Board and engine overrides
        #[command(flatten)]
        overrides: GameOverrides,
    },

    /// Let two engines play each other
    Auto {
        /// Board and engine overrides
        #[command(flatten)]
        overrides: GameOverrides,

        /// Print the final board as an HTML table
        #[arg(long)]
        html: bool,
    },

    /// Print the engine suggestion for a saved session
    Suggest {
        /// Session record written by `play` or `auto`
        session: PathBuf,
    },

    /// Render the board of a saved session
    Render {
        /// Session record written by `play` or `auto`
        session: PathBuf,

        /// Render as an HTML table instead of text
        #[arg(long)]
        html: bool,
    },
}

/// Values that replace the configured ones
#[derive(Args, Debug, Clone, Default)]
pub struct GameOverrides {
    /// Number of columns
    #[arg(long)]
    pub width: Option<usize>,

    /// Number of rows
    #[arg(long)]
    pub height: Option<usize>,

    /// Pieces in a row needed to win
    #[arg(long)]
    pub cnt_in_row: Option<usize>,

    /// Seed for the engine tie-break
    #[arg(long)]
    pub seed: Option<u64>,

    /// Save the session here after every move
    #[arg(long)]
    pub save: Option<PathBuf>,
}

impl From<GameOverrides> for Overrides {
    fn from(value: GameOverrides) -> Self {
        Self {
            width: value.width,
            height: value.height,
            cnt_in_row: value.cnt_in_row,
            seed: value.seed,
            save_path: value.save,
        }
    }
}
