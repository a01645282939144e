use std::collections::{HashSet, VecDeque};

use crate::food::Food;
use crate::grid::{Direction, Grid, Occupancy, Position};
use crate::{INITIAL_SPEED_MS, MIN_SPEED_MS, SPEEDUP_EVERY, SPEED_DECREMENT_MS};

/// Result of driving the snake with the game clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The movement deadline has not passed yet.
    Waiting,
    /// The snake advanced one cell.
    Moved,
    /// The head ran into the body. Terminal.
    Died,
}

/// One player's snake. Owned and mutated only by the controlling client.
#[derive(Debug, Clone)]
pub struct Snake {
    pub id: String,
    body: VecDeque<Position>,
    direction: Direction,
    heading: Direction,
    speed_ms: u64,
    alive: bool,
    next_move_at: u64,
    vacated_tail: Position,
    pending_growth: usize,
    grid: Grid,
}

impl Snake {
    pub fn new(id: impl Into<String>, start: Position, grid: Grid) -> Self {
        let start = grid.wrap(start);
        Self {
            id: id.into(),
            body: VecDeque::from([start]),
            direction: Direction::Right,
            heading: Direction::Right,
            speed_ms: INITIAL_SPEED_MS,
            alive: true,
            next_move_at: 0,
            vacated_tail: start,
            pending_growth: 0,
            grid,
        }
    }

    /// Builds a snake from an explicit body (head first), already travelling
    /// in `direction`. Returns `None` for an empty body or one that covers a
    /// cell twice.
    pub fn with_body(
        id: impl Into<String>,
        body: impl IntoIterator<Item = Position>,
        direction: Direction,
        grid: Grid,
    ) -> Option<Self> {
        let body: VecDeque<Position> = body.into_iter().map(|pos| grid.wrap(pos)).collect();
        let mut seen = HashSet::with_capacity(body.len());
        if !body.iter().all(|pos| seen.insert(*pos)) {
            return None;
        }
        let tail = *body.back()?;
        Some(Self {
            id: id.into(),
            body,
            direction,
            heading: direction,
            speed_ms: INITIAL_SPEED_MS,
            alive: true,
            next_move_at: 0,
            vacated_tail: tail,
            pending_growth: 0,
            grid,
        })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn next_move_at(&self) -> u64 {
        self.next_move_at
    }

    /// Requests a turn for the next move. Only perpendicular turns are
    /// accepted; reversing or repeating the current direction is ignored.
    pub fn set_heading(&mut self, direction: Direction) -> bool {
        if direction.is_orthogonal_to(self.direction) {
            self.heading = direction;
            true
        } else {
            false
        }
    }

    /// Advances the snake one cell if `now_ms` has reached the movement
    /// deadline.
    pub fn tick(&mut self, now_ms: u64) -> MoveOutcome {
        if !self.alive {
            return MoveOutcome::Died;
        }
        if now_ms < self.next_move_at {
            return MoveOutcome::Waiting;
        }

        self.direction = self.heading;
        let new_head = self.grid.step(self.head(), self.direction);

        self.body.push_front(new_head);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else if let Some(tail) = self.body.pop_back() {
            self.vacated_tail = tail;
        }

        // body[1] is the old head slot and can never equal the new head.
        if self.body.iter().skip(1).any(|segment| *segment == new_head) {
            self.alive = false;
            return MoveOutcome::Died;
        }

        self.next_move_at = now_ms + self.speed_ms;
        MoveOutcome::Moved
    }

    /// Adds a segment on the cell vacated by the last move. When the body
    /// still covers that cell (the head just moved into it), the tail is
    /// instead held in place on the next move.
    pub fn grow(&mut self) {
        if self.body.contains(&self.vacated_tail) {
            self.pending_growth += 1;
        } else {
            self.body.push_back(self.vacated_tail);
        }
    }

    /// Eats `food` when the head sits on it: grows, bumps the food counter
    /// and speeds up every `SPEEDUP_EVERY` meals until `MIN_SPEED_MS`.
    pub fn collide_with_food(&mut self, food: &mut Food) -> bool {
        if self.head() != food.position {
            return false;
        }

        self.grow();
        let total = food.consume();
        if self.speed_ms > MIN_SPEED_MS && total % SPEEDUP_EVERY == 0 {
            self.speed_ms = self
                .speed_ms
                .saturating_sub(SPEED_DECREMENT_MS)
                .max(MIN_SPEED_MS);
        }
        true
    }

    /// Cells currently covered by the body.
    pub fn occupancy(&self) -> Occupancy {
        Occupancy::from_cells(self.grid, self.body.iter())
    }
}
