//! Keyboard polling into a per-frame heading intent

use macroquad::prelude::*;
use shared::Direction;

/// Reads the arrow keys (or WASD) held this frame.
pub fn poll_direction() -> Option<Direction> {
    direction_from_keys(
        is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
        is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
        is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
    )
}

/// First held key wins, checked left, right, up, down.
pub fn direction_from_keys(left: bool, right: bool, up: bool, down: bool) -> Option<Direction> {
    if left {
        Some(Direction::Left)
    } else if right {
        Some(Direction::Right)
    } else if up {
        Some(Direction::Up)
    } else if down {
        Some(Direction::Down)
    } else {
        None
    }
}
