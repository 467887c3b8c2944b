//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_grid::{Axis, AxisDescriptor, Board, Mark};
use tracing::{debug, info, instrument};

/// Board shape, win length and player options for one game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Horizontal axis kind and size.
    #[serde(default = "default_axis_x")]
    axis_x: AxisDescriptor,

    /// Vertical axis kind and size.
    #[serde(default = "default_axis_y")]
    axis_y: AxisDescriptor,

    /// Pieces in a row needed to win.
    #[serde(default = "default_cnt_in_row")]
    cnt_in_row: usize,

    /// Mark played by the human in interactive games.
    #[serde(default = "default_human")]
    human: Mark,

    /// Seed for the engine tie-break generator.
    #[serde(default)]
    seed: Option<u64>,

    /// Where to write the session record after every half-move.
    #[serde(default)]
    save_path: Option<PathBuf>,
}

#[instrument]
fn default_axis_x() -> AxisDescriptor {
    AxisDescriptor::Letters { size: 3 }
}

#[instrument]
fn default_axis_y() -> AxisDescriptor {
    AxisDescriptor::OneBased { size: 3 }
}

#[instrument]
fn default_cnt_in_row() -> usize {
    3
}

#[instrument]
fn default_human() -> Mark {
    Mark::X
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            axis_x: default_axis_x(),
            axis_y: default_axis_y(),
            cnt_in_row: default_cnt_in_row(),
            human: default_human(),
            seed: None,
            save_path: None,
        }
    }
}

/// Command-line values that replace configured ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// New x axis size.
    pub width: Option<usize>,
    /// New y axis size.
    pub height: Option<usize>,
    /// New win length.
    pub cnt_in_row: Option<usize>,
    /// New seed.
    pub seed: Option<u64>,
    /// New save path.
    pub save_path: Option<PathBuf>,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            width = axis_size(&config.axis_x),
            height = axis_size(&config.axis_y),
            cnt_in_row = config.cnt_in_row,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies command-line overrides and re-validates.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self, ConfigError> {
        if let Some(width) = overrides.width {
            resize(&mut self.axis_x, width);
        }
        if let Some(height) = overrides.height {
            resize(&mut self.axis_y, height);
        }
        if let Some(cnt_in_row) = overrides.cnt_in_row {
            self.cnt_in_row = cnt_in_row;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if overrides.save_path.is_some() {
            self.save_path = overrides.save_path.clone();
        }
        self.validate()?;
        Ok(self)
    }

    /// Same configuration with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks axis sizes and win length.
    ///
    /// The win length must be at least one and fit along at least one
    /// board dimension.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (x, y) = self.axes()?;
        if self.cnt_in_row < 1 {
            return Err(ConfigError::new(format!(
                "Number in a row for win should be at least 1: {}",
                self.cnt_in_row
            )));
        }
        let longest = x.size().max(y.size());
        if self.cnt_in_row > longest {
            return Err(ConfigError::new(format!(
                "Number in a row for win should be at most {}: {}",
                longest, self.cnt_in_row
            )));
        }
        Ok(())
    }

    fn axes(&self) -> Result<(Axis, Axis), ConfigError> {
        let x = self
            .axis_x
            .to_axis()
            .map_err(|e| ConfigError::new(format!("Invalid x axis: {}", e.kind)))?;
        let y = self
            .axis_y
            .to_axis()
            .map_err(|e| ConfigError::new(format!("Invalid y axis: {}", e.kind)))?;
        Ok((x, y))
    }

    /// Builds an empty board of the configured shape.
    pub fn build_board(&self) -> Result<Board, ConfigError> {
        let (x, y) = self.axes()?;
        Ok(Board::new(x, y))
    }
}

fn axis_size(descriptor: &AxisDescriptor) -> usize {
    match descriptor {
        AxisDescriptor::Int { size }
        | AxisDescriptor::OneBased { size }
        | AxisDescriptor::Letters { size }
        | AxisDescriptor::Fixed { size, .. } => *size,
    }
}

fn resize(descriptor: &mut AxisDescriptor, new_size: usize) {
    match descriptor {
        AxisDescriptor::Int { size }
        | AxisDescriptor::OneBased { size }
        | AxisDescriptor::Letters { size }
        | AxisDescriptor::Fixed { size, .. } => *size = new_size,
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
