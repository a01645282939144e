//! Authoritative game state: the player registry and the food record
//!
//! Nothing in here touches the network. Each event handler mutates the state
//! and returns the messages that should go out, leaving delivery to the
//! network layer.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use shared::{ClientMessage, Food, Grid, PlayerId, PlayerInfo, Position, ServerMessage};

use crate::player_registry::PlayerRegistry;

/// A message produced by the game state, waiting to be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    SendTo {
        client_id: PlayerId,
        message: ServerMessage,
    },
    Broadcast {
        message: ServerMessage,
        exclude: Option<PlayerId>,
    },
}

#[derive(Debug)]
pub struct GameState<R: Rng = StdRng> {
    grid: Grid,
    registry: PlayerRegistry,
    food: Food,
    rng: R,
}

impl<R: Rng> GameState<R> {
    /// Starts with the food on a random cell.
    pub fn new(grid: Grid, mut rng: R) -> Self {
        let food = Food::random(grid, &mut rng);
        info!("Food placed at ({}, {})", food.position.x, food.position.y);
        Self::with_food(grid, food.position, rng)
    }

    pub fn with_food(grid: Grid, food: Position, rng: R) -> Self {
        Self {
            grid,
            registry: PlayerRegistry::new(grid),
            food: Food::new(food),
            rng,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    /// Spawns a new player, hands it the full picture and announces it to
    /// everyone else.
    pub fn connect(&mut self, client_id: &str) -> Vec<Outbound> {
        let spawn = self.registry.add_player(client_id, &mut self.rng);
        self.joined(client_id, spawn)
    }

    /// Like `connect`, with a known spawn cell.
    pub fn connect_at(&mut self, client_id: &str, spawn: Position) -> Vec<Outbound> {
        self.registry.insert(client_id, spawn);
        self.joined(client_id, spawn)
    }

    fn joined(&mut self, client_id: &str, spawn: Position) -> Vec<Outbound> {
        vec![
            Outbound::SendTo {
                client_id: client_id.to_string(),
                message: ServerMessage::Connected {
                    player_id: client_id.to_string(),
                },
            },
            Outbound::SendTo {
                client_id: client_id.to_string(),
                message: ServerMessage::CurrentPlayers(self.registry.snapshot()),
            },
            Outbound::SendTo {
                client_id: client_id.to_string(),
                message: ServerMessage::FoodPosition(self.food.position),
            },
            Outbound::Broadcast {
                message: ServerMessage::NewPlayer(PlayerInfo::new(client_id, spawn)),
                exclude: Some(client_id.to_string()),
            },
        ]
    }

    /// Forgets a player and tells everyone. Unknown ids produce nothing.
    pub fn disconnect(&mut self, client_id: &str) -> Vec<Outbound> {
        if !self.registry.remove_player(client_id) {
            return Vec::new();
        }

        vec![Outbound::Broadcast {
            message: ServerMessage::PlayerDisconnected(client_id.to_string()),
            exclude: None,
        }]
    }

    pub fn handle_message(&mut self, client_id: &str, message: ClientMessage) -> Vec<Outbound> {
        match message {
            ClientMessage::PlayerMovement(position) => self.player_moved(client_id, position),
            ClientMessage::NewFoodPosition(position) => self.food_proposed(client_id, position),
        }
    }

    fn player_moved(&mut self, client_id: &str, position: Position) -> Vec<Outbound> {
        if !self.registry.update_position(client_id, position) {
            return Vec::new();
        }

        vec![Outbound::Broadcast {
            message: ServerMessage::PlayerMoved(PlayerInfo::new(client_id, position)),
            exclude: Some(client_id.to_string()),
        }]
    }

    /// Accepts a proposed food cell only when it lies on the grid. Rejected
    /// proposals get no reply.
    fn food_proposed(&mut self, client_id: &str, position: Position) -> Vec<Outbound> {
        if !self.grid.contains(position) {
            debug!(
                "Dropped out-of-bounds food proposal ({}, {}) from {}",
                position.x, position.y, client_id
            );
            return Vec::new();
        }

        self.food.position = position;
        let total = self.food.consume();
        info!(
            "Food moved to ({}, {}) by {} ({} eaten)",
            position.x, position.y, client_id, total
        );

        vec![Outbound::Broadcast {
            message: ServerMessage::FoodPosition(position),
            exclude: None,
        }]
    }
}
