//! Last-known head position of every connected player
//!
//! The registry is the server's view of who is playing and where. Records are
//! created on connect, overwritten on every movement report and dropped on
//! disconnect. Updates are accepted as-is: the latest report for an id wins,
//! and no reachability check is made against the previous position.

use log::{debug, info};
use rand::Rng;
use shared::{Grid, PlayerId, PlayerInfo, Position};
use std::collections::HashMap;

/// One connected player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub position: Position,
}

impl PlayerRecord {
    pub fn to_info(&self) -> PlayerInfo {
        PlayerInfo::new(self.id.clone(), self.position)
    }
}

/// Connection id to player record, for every connected player
#[derive(Debug)]
pub struct PlayerRegistry {
    players: HashMap<PlayerId, PlayerRecord>,
    grid: Grid,
}

impl PlayerRegistry {
    pub fn new(grid: Grid) -> Self {
        Self {
            players: HashMap::new(),
            grid,
        }
    }

    /// Registers a player at a random cell and returns that spawn cell.
    ///
    /// There is no capacity limit; spawn cells may coincide with other
    /// players or the food.
    pub fn add_player<R: Rng + ?Sized>(&mut self, id: &str, rng: &mut R) -> Position {
        let spawn = Position::new(
            rng.gen_range(0..self.grid.width),
            rng.gen_range(0..self.grid.height),
        );
        self.insert(id, spawn);
        info!("Added player {} at ({}, {})", id, spawn.x, spawn.y);
        spawn
    }

    /// Registers a player at a known cell.
    pub fn insert(&mut self, id: &str, position: Position) {
        self.players.insert(
            id.to_string(),
            PlayerRecord {
                id: id.to_string(),
                position,
            },
        );
    }

    /// Overwrites the stored position. Returns false, and changes nothing,
    /// when the id is unknown (typically already disconnected).
    pub fn update_position(&mut self, id: &str, position: Position) -> bool {
        match self.players.get_mut(id) {
            Some(record) => {
                record.position = position;
                true
            }
            None => {
                debug!("Ignoring movement for unknown player {}", id);
                false
            }
        }
    }

    /// Removes a player. Removing an absent id is a no-op that returns false.
    pub fn remove_player(&mut self, id: &str) -> bool {
        if self.players.remove(id).is_some() {
            info!("Removed player {}", id);
            true
        } else {
            false
        }
    }

    /// Every connected player keyed by id, as sent in `currentPlayers`.
    pub fn snapshot(&self) -> HashMap<PlayerId, PlayerInfo> {
        self.players
            .iter()
            .map(|(id, record)| (id.clone(), record.to_info()))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&PlayerRecord> {
        self.players.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.players.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
