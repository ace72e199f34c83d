//! Game state and core simulation types
//!
//! Everything a run owns lives here: the body, the apple, the direction
//! registers and the counters.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::autopilot::{Autopilot, distance_to_apple};
use super::collision::CollisionKind;
use crate::highscores::{HighScores, RunSummary};
use crate::settings::{AppleSpawn, Settings};

/// Grid coordinate (cell index or pixel offset, see [`crate::GridMetric`])
pub type Position = IVec2;

/// Movement direction. Screen coordinates: `Up` decreases y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self != Direction::None && self.opposite() == other
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Unit offset of one move (zero for `None`)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::None => IVec2::ZERO,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
        }
    }
}

/// What happened on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameEvent {
    #[default]
    None,
    AteApple,
    /// The run ended and the state was reset
    Collided(CollisionKind),
}

/// The snake body, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    segments: Vec<Position>,
}

impl Snake {
    pub fn new(head: Position) -> Self {
        Self {
            segments: vec![head],
        }
    }

    /// Build a snake from explicit segments (head first); `None` if empty
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    /// Segments after the head
    pub fn body(&self) -> &[Position] {
        &self.segments[1..]
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// A snake always has a head
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Shift every segment onto the one ahead of it, then move the head by `offset`
    pub fn slither(&mut self, offset: IVec2) {
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }
        self.segments[0] += offset;
    }

    /// Duplicate the tail; the copy separates on the next move
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.segments.push(tail);
    }

    /// Back to a single segment at `head`
    pub fn reset(&mut self, head: Position) {
        self.segments.truncate(1);
        self.segments[0] = head;
    }
}

/// Public view of the state after a tick, for renderers and audio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Head first
    pub segments: Vec<Position>,
    pub apple: Position,
    pub score: u64,
    pub best_score: u64,
    pub level: u32,
    pub direction: Direction,
    pub move_interval: u32,
    pub autopilot: bool,
    /// Head-to-apple distance in pixels
    pub apple_distance: i32,
    pub event: GameEvent,
}

impl Snapshot {
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    /// HUD text line
    pub fn status_line(&self) -> String {
        if self.direction == Direction::None {
            return "Press up/down/left/right to start".to_string();
        }
        let mode = if self.autopilot { "AI" } else { "Manual" };
        format!(
            "Level: {} Score: {} Best Score: {}, {}, Len: {}",
            self.level, self.score, self.best_score, mode, self.apple_distance
        )
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub snake: Snake,
    pub apple: Position,
    /// Direction applied on the next move; reversal lock is checked against it
    pub direction: Direction,
    pub score: u64,
    /// Survives resets
    pub best_score: u64,
    pub level: u32,
    pub move_interval: u32,
    pub autopilot: bool,
    pub pilot: Autopilot,
    /// Internal tick counter driven by `tick`, wraps on overflow
    pub clock: u64,
    pub last_event: GameEvent,
    /// Finished runs, best first
    pub high_scores: HighScores,
    rng: Pcg32,
}

impl GameState {
    /// Create a fresh game. Settings are assumed valid.
    pub fn new(settings: Settings) -> Self {
        let base = settings.base_difficulty();
        Self {
            snake: Snake::new(settings.start_position()),
            apple: settings.initial_apple_position(),
            direction: Direction::None,
            score: 0,
            best_score: 0,
            level: base.level,
            move_interval: base.move_interval,
            autopilot: false,
            pilot: Autopilot::default(),
            clock: 0,
            last_event: GameEvent::None,
            high_scores: HighScores::new(),
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
        }
    }

    /// Start a new run. Best score, high scores and the autopilot flag survive.
    pub fn reset(&mut self) {
        let base = self.settings.base_difficulty();
        self.snake.reset(self.settings.start_position());
        self.apple = self.settings.initial_apple_position();
        self.direction = Direction::None;
        self.score = 0;
        self.level = base.level;
        self.move_interval = base.move_interval;
        self.pilot.clear();
    }

    /// Request a new direction. Returns false when ignored (reversal or `None`).
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if requested == Direction::None {
            return false;
        }
        if self.direction.is_opposite(requested) {
            log::debug!("Ignored reversal {:?} -> {:?}", self.direction, requested);
            return false;
        }
        self.direction = requested;
        true
    }

    pub fn toggle_autopilot(&mut self) {
        self.autopilot = !self.autopilot;
        log::info!("Autopilot {}", if self.autopilot { "on" } else { "off" });
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.snake.segments().to_vec(),
            apple: self.apple,
            score: self.score,
            best_score: self.best_score,
            level: self.level,
            direction: self.direction,
            move_interval: self.move_interval,
            autopilot: self.autopilot,
            apple_distance: distance_to_apple(self.snake.head(), self.apple, &self.settings),
            event: self.last_event,
        }
    }

    /// Summary of the run in progress, ending on `tick`
    pub fn run_summary(&self, tick: u64) -> RunSummary {
        RunSummary {
            score: self.score,
            level: self.level,
            length: self.snake.len(),
            tick,
        }
    }

    /// Pick a random cell for the next apple
    pub(crate) fn spawn_apple(&mut self) -> Position {
        let width = self.settings.grid_width;
        let height = self.settings.grid_height;

        let cell = match self.settings.apple_spawn {
            AppleSpawn::Anywhere => IVec2::new(
                self.rng.random_range(0..width),
                self.rng.random_range(0..height),
            ),
            AppleSpawn::AvoidSnake => {
                let free: Vec<IVec2> = (0..height)
                    .flat_map(|y| (0..width).map(move |x| IVec2::new(x, y)))
                    .filter(|&cell| !self.snake.occupies(self.settings.cell_to_position(cell)))
                    .collect();
                if free.is_empty() {
                    // Board is full; nothing to avoid
                    IVec2::new(
                        self.rng.random_range(0..width),
                        self.rng.random_range(0..height),
                    )
                } else {
                    free[self.rng.random_range(0..free.len())]
                }
            }
        };

        self.settings.cell_to_position(cell)
    }
}
