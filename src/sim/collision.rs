//! Collision detection on the grid
//!
//! Checks run after the head has moved, in a fixed order: wall, self, apple.

use serde::{Deserialize, Serialize};

use super::state::{Position, Snake};
use crate::settings::Settings;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Wall,
    SelfHit,
}

/// True if `pos` lies outside `[0, width) x [0, height)`
pub fn hits_wall(pos: Position, settings: &Settings) -> bool {
    let bounds = settings.bounds();
    pos.x < 0 || pos.y < 0 || pos.x >= bounds.x || pos.y >= bounds.y
}

/// True if the head shares a cell with any other segment
pub fn hits_self(snake: &Snake) -> bool {
    let head = snake.head();
    snake.body().contains(&head)
}

/// Fatal collision for the current head, wall first
pub fn check_collision(snake: &Snake, settings: &Settings) -> Option<CollisionKind> {
    if hits_wall(snake.head(), settings) {
        Some(CollisionKind::Wall)
    } else if hits_self(snake) {
        Some(CollisionKind::SelfHit)
    } else {
        None
    }
}

pub fn eats_apple(snake: &Snake, apple: Position) -> bool {
    snake.head() == apple
}
