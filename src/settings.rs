//! Simulation settings
//!
//! Everything the core needs at construction: grid geometry, coordinate
//! metric, speed and the level table. Stored as JSON on disk.

use std::fs;
use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How positions are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GridMetric {
    /// Positions are cell indices, one move = one unit
    #[default]
    CellIndex,
    /// Positions are pixel offsets, one move = one cell size
    PixelOffset,
}

impl GridMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridMetric::CellIndex => "cell",
            GridMetric::PixelOffset => "pixel",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cell" | "cells" | "cell-index" => Some(GridMetric::CellIndex),
            "pixel" | "pixels" | "pixel-offset" => Some(GridMetric::PixelOffset),
            _ => None,
        }
    }
}

/// Where a new apple may land after one is eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AppleSpawn {
    /// Any cell, including ones under the snake
    #[default]
    Anywhere,
    /// Only cells the snake does not occupy
    AvoidSnake,
}

/// One row of the level table.
///
/// Matches lengths strictly between `above` and `below` (no upper bound when
/// `below` is `None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBracket {
    pub above: usize,
    pub below: Option<usize>,
    pub level: u32,
    pub move_interval: u32,
    pub score_increment: u64,
}

impl LevelBracket {
    pub fn contains(&self, length: usize) -> bool {
        length > self.above && self.below.is_none_or(|below| length < below)
    }
}

/// Resolved difficulty for a given snake length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty {
    pub level: u32,
    pub move_interval: u32,
    pub score_increment: u64,
}

/// Largest accepted grid, in cells
pub const MAX_GRID_CELLS: i64 = 1 << 20;

/// Errors from loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for apple placement
    pub seed: u64,
    /// Grid width in cells
    pub grid_width: i32,
    /// Grid height in cells
    pub grid_height: i32,
    /// Cell size in pixels
    pub cell_size: i32,
    pub metric: GridMetric,
    /// Move interval at level 1 (ticks per move)
    pub base_move_interval: u32,
    /// Score gained per apple at level 1
    pub score_increment: u64,
    /// Checked in order, first match wins. Lengths matching none are level 1.
    pub level_brackets: Vec<LevelBracket>,
    /// Apple position after a reset, in cells
    pub initial_apple_cell: IVec2,
    pub apple_spawn: AppleSpawn,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            cell_size: CELL_SIZE,
            metric: GridMetric::CellIndex,
            base_move_interval: BASE_MOVE_INTERVAL,
            score_increment: SCORE_INCREMENT,
            level_brackets: vec![
                LevelBracket {
                    above: 10,
                    below: Some(20),
                    level: 2,
                    move_interval: 3,
                    score_increment: SCORE_INCREMENT,
                },
                LevelBracket {
                    above: 20,
                    below: None,
                    level: 3,
                    move_interval: 2,
                    score_increment: SCORE_INCREMENT,
                },
            ],
            initial_apple_cell: IVec2::new(INITIAL_APPLE_CELL.0, INITIAL_APPLE_CELL.1),
            apple_spawn: AppleSpawn::Anywhere,
        }
    }
}

impl Settings {
    /// The classic 64x48 board
    pub fn classic() -> Self {
        Self::default()
    }

    /// Same board, positions in pixels
    pub fn pixel_offset() -> Self {
        Self {
            metric: GridMetric::PixelOffset,
            ..Self::default()
        }
    }

    /// Small board for tests
    pub fn small() -> Self {
        Self {
            grid_width: 10,
            grid_height: 10,
            initial_apple_cell: IVec2::new(1, 1),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Distance covered by one move, in position units
    pub fn step(&self) -> i32 {
        match self.metric {
            GridMetric::CellIndex => 1,
            GridMetric::PixelOffset => self.cell_size,
        }
    }

    /// Factor from position units to pixels
    pub fn pixel_scale(&self) -> i32 {
        match self.metric {
            GridMetric::CellIndex => self.cell_size,
            GridMetric::PixelOffset => 1,
        }
    }

    /// Exclusive upper bound of positions, in position units
    pub fn bounds(&self) -> IVec2 {
        IVec2::new(self.grid_width, self.grid_height) * self.step()
    }

    /// Convert a cell index to a position
    pub fn cell_to_position(&self, cell: IVec2) -> IVec2 {
        cell * self.step()
    }

    /// Where the snake's head starts after a reset (grid centre)
    pub fn start_position(&self) -> IVec2 {
        self.cell_to_position(IVec2::new(self.grid_width / 2, self.grid_height / 2))
    }

    pub fn initial_apple_position(&self) -> IVec2 {
        self.cell_to_position(self.initial_apple_cell)
    }

    pub fn base_difficulty(&self) -> Difficulty {
        Difficulty {
            level: 1,
            move_interval: self.base_move_interval,
            score_increment: self.score_increment,
        }
    }

    /// Level, speed and apple value for a snake of `length` segments
    pub fn difficulty_for_length(&self, length: usize) -> Difficulty {
        self.level_brackets
            .iter()
            .find(|b| b.contains(length))
            .map(|b| Difficulty {
                level: b.level,
                move_interval: b.move_interval,
                score_increment: b.score_increment,
            })
            .unwrap_or_else(|| self.base_difficulty())
    }

    pub fn contains_cell(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.grid_width && cell.y < self.grid_height
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(SettingsError::Invalid(format!(
                "grid must be at least 2x2, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.cell_size < 1 {
            return Err(SettingsError::Invalid(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }
        // One cell of overshoot past the wall must still fit in pixel coordinates
        let span = |cells: i32| cells.checked_add(1).and_then(|c| c.checked_mul(self.cell_size));
        if span(self.grid_width).is_none() || span(self.grid_height).is_none() {
            return Err(SettingsError::Invalid(format!(
                "{}x{} grid of {} px cells overflows pixel coordinates",
                self.grid_width, self.grid_height, self.cell_size
            )));
        }
        if i64::from(self.grid_width) * i64::from(self.grid_height) > MAX_GRID_CELLS {
            return Err(SettingsError::Invalid(format!(
                "grid has more than {} cells",
                MAX_GRID_CELLS
            )));
        }
        if self.base_move_interval < 1 {
            return Err(SettingsError::Invalid(
                "base move interval must be at least 1".to_string(),
            ));
        }
        for bracket in &self.level_brackets {
            if bracket.move_interval < 1 {
                return Err(SettingsError::Invalid(format!(
                    "level {} has a zero move interval",
                    bracket.level
                )));
            }
            if bracket.below.is_some_and(|below| below <= bracket.above + 1) {
                return Err(SettingsError::Invalid(format!(
                    "level {} matches no length",
                    bracket.level
                )));
            }
        }
        if !self.contains_cell(self.initial_apple_cell) {
            return Err(SettingsError::Invalid(format!(
                "initial apple {} is outside the grid",
                self.initial_apple_cell
            )));
        }
        Ok(())
    }

    /// Read and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_difficulty_table() {
        let settings = Settings::default();
        assert_eq!(settings.difficulty_for_length(1).level, 1);
        assert_eq!(settings.difficulty_for_length(10).level, 1);
        assert_eq!(settings.difficulty_for_length(11).level, 2);
        assert_eq!(settings.difficulty_for_length(11).move_interval, 3);
        assert_eq!(settings.difficulty_for_length(19).level, 2);
        // 20 sits between the two brackets
        assert_eq!(settings.difficulty_for_length(20).level, 1);
        assert_eq!(settings.difficulty_for_length(20).move_interval, 4);
        assert_eq!(settings.difficulty_for_length(21).level, 3);
        assert_eq!(settings.difficulty_for_length(500).move_interval, 2);
    }

    #[test]
    fn test_metric_scaling() {
        let cells = Settings::classic();
        assert_eq!(cells.start_position(), IVec2::new(32, 24));
        assert_eq!(cells.initial_apple_position(), IVec2::new(3, 3));
        assert_eq!(cells.bounds(), IVec2::new(64, 48));

        let pixels = Settings::pixel_offset();
        assert_eq!(pixels.start_position(), IVec2::new(320, 240));
        assert_eq!(pixels.initial_apple_position(), IVec2::new(30, 30));
        assert_eq!(pixels.bounds(), IVec2::new(640, 480));
        assert_eq!(pixels.pixel_scale(), 1);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Settings::default().validate().is_ok());

        let zero_speed = Settings {
            base_move_interval: 0,
            ..Settings::default()
        };
        assert!(matches!(zero_speed.validate(), Err(SettingsError::Invalid(_))));

        let apple_outside = Settings {
            initial_apple_cell: IVec2::new(64, 0),
            ..Settings::default()
        };
        assert!(apple_outside.validate().is_err());

        let tiny = Settings {
            grid_width: 1,
            ..Settings::default()
        };
        assert!(tiny.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_grid() {
        let wide = Settings {
            grid_width: 300_000_000,
            ..Settings::pixel_offset()
        };
        assert!(matches!(wide.validate(), Err(SettingsError::Invalid(_))));

        let huge_cells = Settings {
            cell_size: i32::MAX / 2,
            ..Settings::classic()
        };
        assert!(huge_cells.validate().is_err());

        let too_many_cells = Settings {
            grid_width: 2048,
            grid_height: 2048,
            cell_size: 1,
            ..Settings::classic()
        };
        assert!(too_many_cells.validate().is_err());

        let largest = Settings {
            grid_width: 1024,
            grid_height: 1024,
            cell_size: 1000,
            ..Settings::pixel_offset()
        };
        assert!(largest.validate().is_ok());
        assert_eq!(largest.bounds(), IVec2::new(1_024_000, 1_024_000));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "grid_width": 20, "metric": "PixelOffset" }"#).unwrap();
        assert_eq!(settings.grid_width, 20);
        assert_eq!(settings.grid_height, GRID_HEIGHT);
        assert_eq!(settings.metric, GridMetric::PixelOffset);
        assert_eq!(settings.level_brackets.len(), 2);
    }

    #[test]
    fn test_save_load_file() {
        let path = std::env::temp_dir().join(format!("snake-settings-{}.json", std::process::id()));
        let settings = Settings::small().with_seed(7);
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/nonexistent/snake.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
