use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use shared::{
    choose_free_cell, ClientMessage, Direction, Food, Grid, MoveOutcome, PlayerId, Position,
    ServerMessage, Snake,
};
use std::collections::HashMap;

/// Everything one client knows: its own snake, cached peers and the food.
///
/// Built when the client starts and dropped when it quits. Server messages
/// only touch the caches; the snake itself moves only through `update`.
pub struct ClientGameState<R: Rng = StdRng> {
    player_id: Option<PlayerId>,
    snake: Option<Snake>,
    food: Food,
    remote_players: HashMap<PlayerId, Position>,
    grid: Grid,
    rng: R,
}

impl<R: Rng> ClientGameState<R> {
    pub fn new(grid: Grid, rng: R) -> Self {
        Self {
            player_id: None,
            snake: None,
            food: Food::default(),
            remote_players: HashMap::new(),
            grid,
            rng,
        }
    }

    pub fn player_id(&self) -> Option<&str> {
        self.player_id.as_deref()
    }

    pub fn snake(&self) -> Option<&Snake> {
        self.snake.as_ref()
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn remote_players(&self) -> &HashMap<PlayerId, Position> {
        &self.remote_players
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn score(&self) -> u32 {
        self.food.total_consumed
    }

    pub fn is_game_over(&self) -> bool {
        self.snake.as_ref().map(|s| !s.is_alive()).unwrap_or(false)
    }

    fn is_own(&self, id: &str) -> bool {
        self.player_id.as_deref() == Some(id)
    }

    pub fn apply_server_message(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::Connected { player_id } => {
                info!("Connected! Player ID: {}", player_id);
                self.player_id = Some(player_id);
            }

            ServerMessage::CurrentPlayers(players) => {
                if self.player_id.is_none() {
                    warn!("Player list arrived before our id, showing everyone as peers");
                }
                for (id, info) in players {
                    if self.is_own(&id) {
                        self.snake = Some(Snake::new(id, info.position(), self.grid));
                    } else {
                        self.remote_players.insert(id, info.position());
                    }
                }
            }

            ServerMessage::NewPlayer(info) => {
                if !self.is_own(&info.player_id) {
                    debug!("Player {} joined", info.player_id);
                    let position = info.position();
                    self.remote_players.insert(info.player_id, position);
                }
            }

            ServerMessage::PlayerMoved(info) => {
                if let Some(position) = self.remote_players.get_mut(&info.player_id) {
                    *position = Position::new(info.x, info.y);
                }
            }

            ServerMessage::PlayerDisconnected(id) => {
                if self.remote_players.remove(&id).is_some() {
                    debug!("Player {} left", id);
                }
            }

            ServerMessage::FoodPosition(position) => {
                self.food.position = position;
            }
        }
    }

    /// Runs one frame of the local simulation and returns the messages to
    /// send. Nothing happens before the snake has spawned or after it died.
    pub fn update(&mut self, now_ms: u64, intent: Option<Direction>) -> Vec<ClientMessage> {
        let snake = match self.snake.as_mut() {
            Some(snake) if snake.is_alive() => snake,
            _ => return Vec::new(),
        };

        if let Some(direction) = intent {
            snake.set_heading(direction);
        }

        match snake.tick(now_ms) {
            MoveOutcome::Waiting => Vec::new(),
            MoveOutcome::Died => {
                info!("Game over with score {}", self.food.total_consumed);
                Vec::new()
            }
            MoveOutcome::Moved => {
                let mut outgoing = vec![ClientMessage::PlayerMovement(snake.head())];

                if snake.collide_with_food(&mut self.food) {
                    match choose_free_cell(&snake.occupancy(), &mut self.rng) {
                        Ok(position) => outgoing.push(ClientMessage::NewFoodPosition(position)),
                        Err(e) => warn!("Could not propose new food: {}", e),
                    }
                }

                outgoing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use shared::{PlayerInfo, DEFAULT_FOOD, GRID_WIDTH};

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn joined(own: &str, players: &[(&str, Position)]) -> ClientGameState {
        let mut state = ClientGameState::new(Grid::default(), StdRng::seed_from_u64(9));
        state.apply_server_message(ServerMessage::Connected {
            player_id: own.to_string(),
        });
        let snapshot = players
            .iter()
            .map(|(id, pos)| (id.to_string(), PlayerInfo::new(*id, *pos)))
            .collect();
        state.apply_server_message(ServerMessage::CurrentPlayers(snapshot));
        state
    }

    #[test]
    fn test_initial_state() {
        let state: ClientGameState =
            ClientGameState::new(Grid::default(), StdRng::seed_from_u64(1));
        assert!(state.player_id().is_none());
        assert!(state.snake().is_none());
        assert_eq!(state.food().position, DEFAULT_FOOD);
        assert_eq!(state.score(), 0);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_current_players_splits_own_and_remote() {
        let state = joined("b", &[("a", p(5, 5)), ("b", p(10, 10))]);

        assert_eq!(state.player_id(), Some("b"));
        assert_eq!(state.snake().unwrap().head(), p(10, 10));
        assert_eq!(state.remote_players().len(), 1);
        assert_eq!(state.remote_players()["a"], p(5, 5));
    }

    #[test]
    fn test_peer_lifecycle() {
        let mut state = joined("a", &[("a", p(5, 5))]);

        state.apply_server_message(ServerMessage::NewPlayer(PlayerInfo::new("b", p(10, 10))));
        assert_eq!(state.remote_players()["b"], p(10, 10));

        state.apply_server_message(ServerMessage::PlayerMoved(PlayerInfo::new("b", p(11, 10))));
        assert_eq!(state.remote_players()["b"], p(11, 10));

        state.apply_server_message(ServerMessage::PlayerDisconnected("b".to_string()));
        assert!(state.remote_players().is_empty());
    }

    #[test]
    fn test_own_and_unknown_ids_ignored() {
        let mut state = joined("a", &[("a", p(5, 5))]);

        state.apply_server_message(ServerMessage::NewPlayer(PlayerInfo::new("a", p(1, 1))));
        state.apply_server_message(ServerMessage::PlayerMoved(PlayerInfo::new("z", p(2, 2))));
        state.apply_server_message(ServerMessage::PlayerDisconnected("z".to_string()));

        assert!(state.remote_players().is_empty());
        assert_eq!(state.snake().unwrap().head(), p(5, 5));
    }

    #[test]
    fn test_food_position_replaces_cache() {
        let mut state = joined("a", &[("a", p(5, 5))]);
        state.apply_server_message(ServerMessage::FoodPosition(p(20, 7)));
        assert_eq!(state.food().position, p(20, 7));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_update_before_spawn_is_silent() {
        let mut state: ClientGameState =
            ClientGameState::new(Grid::default(), StdRng::seed_from_u64(1));
        assert!(state.update(0, Some(Direction::Up)).is_empty());
    }

    #[test]
    fn test_update_reports_new_head() {
        let mut state = joined("a", &[("a", p(5, 5))]);

        assert_eq!(
            state.update(0, None),
            vec![ClientMessage::PlayerMovement(p(6, 5))]
        );
        assert!(state.update(50, None).is_empty());
        assert_eq!(
            state.update(100, Some(Direction::Down)),
            vec![ClientMessage::PlayerMovement(p(6, 6))]
        );
    }

    #[test]
    fn test_update_ignores_reversal_intent() {
        let mut state = joined("a", &[("a", p(5, 5))]);
        assert_eq!(
            state.update(0, Some(Direction::Left)),
            vec![ClientMessage::PlayerMovement(p(6, 5))]
        );
    }

    #[test]
    fn test_update_wraps_at_edge() {
        let mut state = joined("a", &[("a", p(GRID_WIDTH - 1, 3))]);
        assert_eq!(
            state.update(0, None),
            vec![ClientMessage::PlayerMovement(p(0, 3))]
        );
    }

    #[test]
    fn test_eating_proposes_free_cell() {
        let mut state = joined("a", &[("a", p(2, 4))]);
        state.apply_server_message(ServerMessage::FoodPosition(p(3, 4)));

        let outgoing = state.update(0, None);
        assert_eq!(outgoing.len(), 2);
        assert_eq!(outgoing[0], ClientMessage::PlayerMovement(p(3, 4)));
        match outgoing[1] {
            ClientMessage::NewFoodPosition(pos) => {
                assert!(Grid::default().contains(pos));
                assert_ne!(pos, p(3, 4));
                assert_ne!(pos, p(2, 4));
            }
            ref other => panic!("Unexpected message {:?}", other),
        }

        assert_eq!(state.score(), 1);
        assert_eq!(state.snake().unwrap().len(), 2);
        // The cached food stays put until the server confirms.
        assert_eq!(state.food().position, p(3, 4));
    }

    #[test]
    fn test_full_board_sends_no_food_proposal() {
        let grid = Grid::new(2, 1);
        let mut state = ClientGameState::new(grid, StdRng::seed_from_u64(3));
        state.apply_server_message(ServerMessage::Connected {
            player_id: "a".to_string(),
        });
        let mut players = std::collections::HashMap::new();
        players.insert("a".to_string(), PlayerInfo::new("a", p(0, 0)));
        state.apply_server_message(ServerMessage::CurrentPlayers(players));
        state.apply_server_message(ServerMessage::FoodPosition(p(1, 0)));

        assert_eq!(
            state.update(0, None),
            vec![ClientMessage::PlayerMovement(p(1, 0))]
        );
        assert_eq!(state.snake().unwrap().len(), 2);
        assert_eq!(state.score(), 1);
        assert_eq!(state.food().position, p(1, 0));
    }

    #[test]
    fn test_death_is_terminal() {
        let mut state = joined("a", &[("a", p(2, 2))]);
        state.snake = Snake::with_body(
            "a",
            [p(2, 2), p(2, 3), p(3, 3), p(3, 2), p(3, 1)],
            Direction::Up,
            Grid::default(),
        );

        assert!(state.update(0, Some(Direction::Right)).is_empty());
        assert!(state.is_game_over());
        assert!(state.update(1_000, Some(Direction::Up)).is_empty());
    }
}
