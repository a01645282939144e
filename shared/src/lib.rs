pub mod food;
pub mod grid;
pub mod protocol;
pub mod snake;

pub use food::{choose_free_cell, Food, PlacementError};
pub use grid::{Direction, Grid, Occupancy, Position};
pub use protocol::{ClientMessage, PlayerId, PlayerInfo, ServerMessage};
pub use snake::{MoveOutcome, Snake};

pub const CELL_SIZE: u32 = 16;
pub const GRID_WIDTH: i32 = 45;
pub const GRID_HEIGHT: i32 = 30;

pub const INITIAL_SPEED_MS: u64 = 100;
pub const MIN_SPEED_MS: u64 = 20;
pub const SPEED_DECREMENT_MS: u64 = 5;
pub const SPEEDUP_EVERY: u32 = 5;

/// Food cell a client shows before the server has announced the real one.
pub const DEFAULT_FOOD: Position = Position { x: 3, y: 4 };
