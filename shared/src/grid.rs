use serde::{Deserialize, Serialize};

use crate::{GRID_HEIGHT, GRID_WIDTH};

/// A cell on the grid, in cell units (not pixels).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// True when the two directions are perpendicular.
    pub fn is_orthogonal_to(self, other: Direction) -> bool {
        self.is_vertical() != other.is_vertical()
    }

    /// Unit step in screen coordinates (y grows downwards).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Fixed grid dimensions with wrap-around on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid extents must be positive");
        Self { width, height }
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Folds any position back onto the grid. `rem_euclid` keeps the result
    /// non-negative where `%` would not.
    pub fn wrap(&self, pos: Position) -> Position {
        Position {
            x: pos.x.rem_euclid(self.width),
            y: pos.y.rem_euclid(self.height),
        }
    }

    pub fn step(&self, pos: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        self.wrap(Position::new(pos.x + dx, pos.y + dy))
    }

    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some((pos.y * self.width + pos.x) as usize)
        } else {
            None
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

/// Boolean occupancy over a grid. Built on demand, never stored.
#[derive(Debug, Clone)]
pub struct Occupancy {
    grid: Grid,
    cells: Vec<bool>,
}

impl Occupancy {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cells: vec![false; grid.cell_count()],
        }
    }

    pub fn from_cells<'a>(grid: Grid, occupied: impl IntoIterator<Item = &'a Position>) -> Self {
        let mut occupancy = Self::new(grid);
        for pos in occupied {
            occupancy.mark(*pos);
        }
        occupancy
    }

    /// Marks a cell as occupied. Cells outside the grid are ignored.
    pub fn mark(&mut self, pos: Position) {
        if let Some(index) = self.grid.index(pos) {
            self.cells[index] = true;
        }
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.grid
            .index(pos)
            .map(|index| self.cells[index])
            .unwrap_or(false)
    }

    pub fn free_cells(&self) -> Vec<Position> {
        self.grid
            .cells()
            .filter(|pos| !self.is_occupied(*pos))
            .collect()
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }
}
