//! Greedy autopilot
//!
//! Not a pathfinder. Keeps going while the apple gets closer, otherwise turns
//! 90 degrees toward it, which yields a zig-zag approach. It cannot ask for a
//! reversal (the direction lock would drop it), so an apple straight behind
//! the head can leave it circling.

use serde::{Deserialize, Serialize};

use super::state::{Direction, Position};
use crate::settings::Settings;

/// Euclidean head-to-apple distance in pixels, truncated
pub fn distance_to_apple(head: Position, apple: Position, settings: &Settings) -> i32 {
    let offset = (apple - head) * settings.pixel_scale();
    offset.as_dvec2().length() as i32
}

/// Autopilot memory between moves
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Autopilot {
    previous_distance: Option<i32>,
}

impl Autopilot {
    pub fn previous_distance(&self) -> Option<i32> {
        self.previous_distance
    }

    pub fn clear(&mut self) {
        self.previous_distance = None;
    }

    /// Pick the direction for the next move
    pub fn choose(
        &mut self,
        head: Position,
        apple: Position,
        current: Direction,
        settings: &Settings,
    ) -> Direction {
        let distance = distance_to_apple(head, apple, settings);
        let Some(previous) = self.previous_distance.replace(distance) else {
            return current;
        };

        if distance < previous && distance != settings.cell_size {
            return current;
        }

        if current.is_horizontal() {
            if apple.y > head.y {
                Direction::Down
            } else {
                Direction::Up
            }
        } else if current.is_vertical() {
            if apple.x > head.x {
                Direction::Right
            } else {
                Direction::Left
            }
        } else {
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_distance_scaling() {
        let cells = Settings::classic();
        assert_eq!(distance_to_apple(IVec2::new(0, 0), IVec2::new(3, 4), &cells), 50);
        assert_eq!(distance_to_apple(IVec2::new(0, 0), IVec2::new(1, 1), &cells), 14);

        let pixels = Settings::pixel_offset();
        assert_eq!(
            distance_to_apple(IVec2::new(0, 0), IVec2::new(30, 40), &pixels),
            50
        );
    }

    #[test]
    fn test_first_call_keeps_direction() {
        let settings = Settings::classic();
        let mut pilot = Autopilot::default();
        let dir = pilot.choose(IVec2::new(10, 10), IVec2::new(3, 3), Direction::Right, &settings);
        assert_eq!(dir, Direction::Right);
        assert_eq!(pilot.previous_distance(), Some(98));
    }

    #[test]
    fn test_keeps_direction_while_closing_in() {
        let settings = Settings::classic();
        let mut pilot = Autopilot::default();
        let apple = IVec2::new(20, 15);
        pilot.choose(IVec2::new(10, 10), apple, Direction::Right, &settings);
        let dir = pilot.choose(IVec2::new(11, 10), apple, Direction::Right, &settings);
        assert_eq!(dir, Direction::Right);
    }

    #[test]
    fn test_turns_when_moving_away() {
        let settings = Settings::classic();
        let mut pilot = Autopilot::default();
        let apple = IVec2::new(5, 15);
        pilot.choose(IVec2::new(10, 10), apple, Direction::Right, &settings);
        // Farther now: turn toward the apple's row
        let dir = pilot.choose(IVec2::new(11, 10), apple, Direction::Right, &settings);
        assert_eq!(dir, Direction::Down);

        let apple = IVec2::new(5, 2);
        pilot.clear();
        pilot.choose(IVec2::new(10, 10), apple, Direction::Left, &settings);
        let dir = pilot.choose(IVec2::new(10, 10), apple, Direction::Left, &settings);
        assert_eq!(dir, Direction::Up);
    }

    #[test]
    fn test_vertical_turns_horizontal() {
        let settings = Settings::classic();
        let mut pilot = Autopilot::default();
        let apple = IVec2::new(15, 2);
        pilot.choose(IVec2::new(10, 5), apple, Direction::Down, &settings);
        let dir = pilot.choose(IVec2::new(10, 6), apple, Direction::Down, &settings);
        assert_eq!(dir, Direction::Right);

        let apple = IVec2::new(3, 20);
        pilot.clear();
        pilot.choose(IVec2::new(10, 5), apple, Direction::Up, &settings);
        let dir = pilot.choose(IVec2::new(10, 4), apple, Direction::Up, &settings);
        assert_eq!(dir, Direction::Left);
    }

    #[test]
    fn test_turns_when_adjacent() {
        let settings = Settings::classic();
        let mut pilot = Autopilot::default();
        // Apple one cell below, after closing in along the column
        let apple = IVec2::new(10, 12);
        pilot.choose(IVec2::new(10, 9), apple, Direction::Down, &settings);
        let dir = pilot.choose(IVec2::new(10, 11), apple, Direction::Down, &settings);
        // Adjacent distance forces a re-evaluation; apple is not to the right
        assert_eq!(dir, Direction::Left);
    }

    #[test]
    fn test_idle_stays_idle() {
        let settings = Settings::classic();
        let mut pilot = Autopilot::default();
        pilot.choose(IVec2::new(10, 10), IVec2::new(3, 3), Direction::None, &settings);
        let dir = pilot.choose(IVec2::new(10, 10), IVec2::new(3, 3), Direction::None, &settings);
        assert_eq!(dir, Direction::None);
    }
}
