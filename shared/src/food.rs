use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

use crate::grid::{Grid, Occupancy, Position};
use crate::DEFAULT_FOOD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Every cell on the grid is occupied.
    NoFreeCell,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::NoFreeCell => write!(f, "no free cell left for food"),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Picks a cell uniformly at random among the cells not marked in `occupied`.
pub fn choose_free_cell<R: Rng + ?Sized>(
    occupied: &Occupancy,
    rng: &mut R,
) -> Result<Position, PlacementError> {
    occupied
        .free_cells()
        .choose(rng)
        .copied()
        .ok_or(PlacementError::NoFreeCell)
}

/// The single food item and how many times it has been eaten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub total_consumed: u32,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            total_consumed: 0,
        }
    }

    /// Places food on any cell of an empty grid.
    pub fn random<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Self {
        let position = Position::new(rng.gen_range(0..grid.width), rng.gen_range(0..grid.height));
        Self::new(position)
    }

    /// Moves the food to a random free cell. On failure the previous
    /// position is kept.
    pub fn place_random<R: Rng + ?Sized>(
        &mut self,
        occupied: &Occupancy,
        rng: &mut R,
    ) -> Result<Position, PlacementError> {
        let position = choose_free_cell(occupied, rng)?;
        self.position = position;
        Ok(position)
    }

    pub fn consume(&mut self) -> u32 {
        self.total_consumed += 1;
        self.total_consumed
    }
}

impl Default for Food {
    fn default() -> Self {
        Self::new(DEFAULT_FOOD)
    }
}
