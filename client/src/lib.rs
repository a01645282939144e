//! # Grid Snake Client Library
//!
//! Client side of the multiplayer snake game. Each client simulates its own
//! snake locally for smooth movement and reports the head cell to the server
//! after every move. Other players are shown as proxies that simply jump to
//! whatever cell the server last relayed; they are never simulated here.
//!
//! ## Module Organization
//!
//! ### Game Module (`game`)
//! The per-client state: own snake, cached peer positions and the cached food
//! cell. Server messages update the caches; `update` advances the snake and
//! produces the messages to send, including food proposals after eating.
//!
//! ### Network Module (`network`)
//! A WebSocket session on its own thread and tokio runtime. The frame loop
//! talks to it through unbounded queues and never blocks on it.
//!
//! ### Input Module (`input`)
//! Turns held keys into an optional heading for the current frame.
//!
//! ### Rendering Module (`rendering`)
//! Draws the state with macroquad. It only reads the game state, so the
//! simulation runs the same with or without a window.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::game::ClientGameState;
//! use client::network::spawn_network_thread;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use shared::{Direction, Grid};
//!
//! let mut network = spawn_network_thread("ws://127.0.0.1:3000".to_string());
//! let mut game = ClientGameState::new(Grid::default(), StdRng::from_entropy());
//!
//! for frame in 0..600u64 {
//!     for message in network.drain() {
//!         game.apply_server_message(message);
//!     }
//!     for message in game.update(frame * 16, Some(Direction::Down)) {
//!         network.send(message);
//!     }
//! }
//! ```

pub mod game;
pub mod input;
pub mod network;
pub mod rendering;
