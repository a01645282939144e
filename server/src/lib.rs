//! # Grid Snake Server Library
//!
//! The authoritative side of the multiplayer snake game. Clients simulate
//! their own snake and report where its head is; the server keeps the list of
//! connected players, relays movement to everyone else, and owns the single
//! food cell that all clients converge on.
//!
//! ## Architecture
//!
//! ### One task per connection
//! Every accepted WebSocket gets its own task. The task decodes incoming JSON
//! frames into [`shared::ClientMessage`] values and forwards them as events;
//! it also drains a queue of outgoing [`shared::ServerMessage`] values onto
//! the socket.
//!
//! ### Single-owner event loop
//! All connection tasks feed one channel. The main loop is the only code that
//! touches the player registry and the food record, so mutations are
//! serialized and each player's updates apply in the order they arrived.
//!
//! ### Fire-and-forget delivery
//! Nothing is acknowledged or retried. Messages for a connection that already
//! closed are dropped, and malformed frames are logged and ignored.
//!
//! ## Module Organization
//!
//! - `player_registry`: connection id to last-known head position
//! - `game`: registry and food event handling, producing outbound dispatches
//! - `client_manager`: outbound queues of live connections
//! - `network`: listener, WebSocket tasks and the main event loop
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::network::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = Server::bind(ServerConfig::default()).await?;
//!     server.run().await;
//!     Ok(())
//! }
//! ```

pub mod client_manager;
pub mod game;
pub mod network;
pub mod player_registry;
