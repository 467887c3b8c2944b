//! Strictly Lines - N-in-a-row on configurable boards
//!
//! Wraps the [`strictly_grid`] engine in a playable application: TOML
//! configuration, persisted sessions and console input.
//!
//! # Architecture
//!
//! - **Config**: board shape, win length and seed from TOML plus overrides
//! - **Session**: two players alternating on one board, saved as JSON
//! - **Console**: `x:y` move parsing and the interactive prompt
//!
//! # Example
//!
//! ```
//! use strictly_lines::{GameConfig, GameSession, PlayerKind};
//!
//! # fn example() -> Result<(), strictly_lines::SessionError> {
//! let config = GameConfig::default().with_seed(7);
//! let mut session = GameSession::new(&config, PlayerKind::Engine, PlayerKind::Engine)?;
//! while session.engine_step()?.is_some() {}
//! assert!(session.status().is_terminal());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod console;
pub mod session;

pub use config::{ConfigError, GameConfig, Overrides};
pub use console::{ACCEPT_DEFAULT, parse_point, prompt_point};
pub use session::{
    GameSession, PlayerKind, PlayerSpec, SessionError, SessionErrorKind, SessionRecord, SharedSession,
};
