//! Snake Core - A grid Snake simulation with an autopilot
//!
//! Core modules:
//! - `sim`: Discrete-time simulation (movement, collisions, growth, autopilot)
//! - `settings`: Grid geometry, speed and level table
//! - `highscores`: In-memory leaderboard of finished runs
//! - `audio`: Sound cues derived from simulation events
//!
//! Rendering, audio playback and input devices belong to the embedding
//! application, which feeds [`sim::TickInput`] in and reads [`sim::Snapshot`] out.

pub mod audio;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use audio::{AudioTrigger, SoundEffect};
pub use highscores::{HighScores, RunSummary};
pub use settings::{AppleSpawn, GridMetric, LevelBracket, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Grid size in cells (640x480 screen at 10 px per cell)
    pub const GRID_WIDTH: i32 = 64;
    pub const GRID_HEIGHT: i32 = 48;
    /// Cell size in pixels
    pub const CELL_SIZE: i32 = 10;

    /// Ticks per move at level 1
    pub const BASE_MOVE_INTERVAL: u32 = 4;
    /// Points per apple
    pub const SCORE_INCREMENT: u64 = 1;

    /// Apple cell after a reset
    pub const INITIAL_APPLE_CELL: (i32, i32) = (3, 3);

    pub const DEFAULT_SEED: u64 = 0x5eed_5a4e;
}
