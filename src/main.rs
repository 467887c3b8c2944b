//! Strictly Lines - console front end
//!
//! Play N-in-a-row against the engine, watch two engines play, or inspect
//! a saved session.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, GameOverrides};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use strictly_grid::{ConsoleRenderer, HtmlRenderer, Renderer};
use strictly_lines::{
    GameConfig, GameSession, Overrides, PlayerKind, SessionError, SessionErrorKind, prompt_point,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { overrides } => run_play(load_config(cli.config.as_deref(), overrides)?),
        Command::Auto { overrides, html } => run_auto(load_config(cli.config.as_deref(), overrides)?, html),
        Command::Suggest { session } => run_suggest(session),
        Command::Render { session, html } => run_render(session, html),
    }
}

/// Loads the config file, or defaults, and applies command-line overrides.
fn load_config(path: Option<&Path>, overrides: GameOverrides) -> Result<GameConfig> {
    let config = match path {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    Ok(config.with_overrides(&Overrides::from(overrides))?)
}

fn save_if_configured(session: &GameSession, path: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = path {
        session
            .save(path)
            .with_context(|| format!("Saving session to {}", path.display()))?;
    }
    Ok(())
}

/// Interactive game: the human plays the configured mark.
#[instrument(skip(config))]
fn run_play(config: GameConfig) -> Result<()> {
    let (x_kind, o_kind) = match *config.human() {
        strictly_grid::Mark::X => (PlayerKind::Human, PlayerKind::Engine),
        strictly_grid::Mark::O => (PlayerKind::Engine, PlayerKind::Human),
    };
    let mut session = GameSession::new(&config, x_kind, o_kind)?;
    info!(human = %config.human(), "Starting interactive game");

    let renderer = ConsoleRenderer::default();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    while !session.status().is_terminal() {
        write!(output, "{}", renderer.render(session.board()))?;
        match session.to_move_kind() {
            PlayerKind::Human => {
                let suggestion = session.suggest()?;
                let Some(point) = prompt_point(&mut input, &mut output, session.board(), suggestion.as_ref())?
                else {
                    info!("Input closed, leaving game");
                    break;
                };
                match session.play(point) {
                    Ok(_) => {}
                    Err(SessionError {
                        kind: SessionErrorKind::Grid(grid),
                        ..
                    }) => {
                        writeln!(output, "{}", grid.kind)?;
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            PlayerKind::Engine => {
                if let Some((point, _)) = session.engine_step()? {
                    writeln!(output, "Player {} moves {}", session.to_move().opponent(), point)?;
                }
            }
        }
        save_if_configured(&session, config.save_path().as_ref())?;
    }

    write!(output, "{}", renderer.render(session.board()))?;
    writeln!(output, "{}", session.status())?;
    Ok(())
}

/// Engine against engine until a terminal state.
#[instrument(skip(config))]
fn run_auto(config: GameConfig, html: bool) -> Result<()> {
    let mut session = GameSession::new(&config, PlayerKind::Engine, PlayerKind::Engine)?;
    let mut output = io::stdout();
    while let Some((point, _)) = session.engine_step()? {
        writeln!(output, "Player {} moves {}", session.to_move().opponent(), point)?;
        save_if_configured(&session, config.save_path().as_ref())?;
    }
    print_board(&session, html)?;
    writeln!(output, "{}", session.status())?;
    info!(moves = session.history().len(), "Game finished");
    Ok(())
}

#[instrument(skip(path), fields(path = %path.display()))]
fn run_suggest(path: PathBuf) -> Result<()> {
    let mut session = GameSession::load(&path)?;
    match session.suggest()? {
        Some(point) => println!("{}", point),
        None => {
            warn!(status = %session.status(), "No move to suggest");
            println!("{}", session.status());
        }
    }
    Ok(())
}

#[instrument(skip(path), fields(path = %path.display()))]
fn run_render(path: PathBuf, html: bool) -> Result<()> {
    let session = GameSession::load(&path)?;
    print_board(&session, html)
}

fn print_board(session: &GameSession, html: bool) -> Result<()> {
    let text = if html {
        HtmlRenderer::default().render(session.board())
    } else {
        ConsoleRenderer::default().render(session.board())
    };
    let mut output = io::stdout();
    write!(output, "{}", text)?;
    if html {
        writeln!(output)?;
    }
    Ok(())
}
