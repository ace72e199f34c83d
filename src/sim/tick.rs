//! Discrete-time simulation tick
//!
//! Core game loop step that advances the simulation by one tick.

use super::collision::{check_collision, eats_apple};
use super::state::{Direction, GameEvent, GameState, Snapshot};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Arrow key / WASD press
    pub direction: Option<Direction>,
    /// Escape
    pub reset: bool,
    /// Space
    pub toggle_autopilot: bool,
}

impl TickInput {
    pub fn turn(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Default::default()
        }
    }

    /// Apply to the state. One command per tick: direction, then reset, then toggle.
    pub fn apply(&self, state: &mut GameState) {
        if let Some(direction) = self.direction {
            state.set_direction(direction);
        } else if self.reset {
            state.reset();
        } else if self.toggle_autopilot {
            state.toggle_autopilot();
        }
    }
}

/// Apply `input`, then advance on the state's own clock
pub fn tick(state: &mut GameState, input: &TickInput) -> Snapshot {
    input.apply(state);
    let now = state.clock;
    state.clock = state.clock.wrapping_add(1);
    advance(state, now)
}

/// Advance the game state by one tick of the external loop
pub fn advance(state: &mut GameState, tick: u64) -> Snapshot {
    let interval = u64::from(state.move_interval.max(1));
    state.last_event = if tick % interval == 0 {
        move_snake(state, tick)
    } else {
        GameEvent::None
    };
    state.snapshot()
}

fn move_snake(state: &mut GameState, tick: u64) -> GameEvent {
    if state.autopilot {
        let wanted = state.pilot.choose(
            state.snake.head(),
            state.apple,
            state.direction,
            &state.settings,
        );
        state.set_direction(wanted);
    }

    if state.direction == Direction::None {
        return GameEvent::None;
    }

    let offset = state.direction.delta() * state.settings.step();
    state.snake.slither(offset);

    if let Some(kind) = check_collision(&state.snake, &state.settings) {
        log::info!(
            "Collision ({:?}) at {} with score {}",
            kind,
            state.snake.head(),
            state.score
        );
        let summary = state.run_summary(tick);
        if let Some(rank) = state.high_scores.add_run(summary) {
            log::info!("Run ranked #{} with score {}", rank, summary.score);
        }
        state.reset();
        return GameEvent::Collided(kind);
    }

    if eats_apple(&state.snake, state.apple) {
        eat_apple(state);
        return GameEvent::AteApple;
    }

    GameEvent::None
}

fn eat_apple(state: &mut GameState) {
    state.snake.grow();

    let difficulty = state.settings.difficulty_for_length(state.snake.len());
    state.score += difficulty.score_increment;
    if difficulty.level != state.level {
        log::info!("Level {} -> {}", state.level, difficulty.level);
    }
    state.level = difficulty.level;
    state.move_interval = difficulty.move_interval;
    state.best_score = state.best_score.max(state.score);

    state.apple = state.spawn_apple();
    log::debug!(
        "Apple eaten, length {} score {}, next apple at {}",
        state.snake.len(),
        state.score,
        state.apple
    );
}
