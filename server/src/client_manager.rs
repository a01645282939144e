//! Connection tracking for the WebSocket server
//!
//! Each accepted connection is represented by an outbound queue feeding that
//! connection's socket task. The client manager owns those queues and knows
//! how to reach one client or every client but one. Sends are fire-and-forget:
//! a queue whose connection already went away, or that is full because the
//! peer stopped reading, is skipped without error.

use log::{debug, info, warn};
use shared::{PlayerId, ServerMessage};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Messages queued per connection before further ones are dropped
pub const OUTGOING_BUFFER: usize = 256;

/// A live connection and the queue feeding its socket
#[derive(Debug)]
pub struct Client {
    /// Connection id, also the player id
    pub id: PlayerId,
    /// Remote address, for logging
    pub addr: SocketAddr,
    pub connected_at: Instant,
    sender: mpsc::Sender<ServerMessage>,
}

impl Client {
    pub fn new(id: PlayerId, addr: SocketAddr, sender: mpsc::Sender<ServerMessage>) -> Self {
        Self {
            id,
            addr,
            connected_at: Instant::now(),
            sender,
        }
    }

    /// Queues a message for this client without waiting. Returns false if
    /// the queue is full or the connection's socket task has finished.
    pub fn send(&self, message: ServerMessage) -> bool {
        match self.sender.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("Outgoing queue for {} is full, dropping message", self.id);
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}

/// All live connections, keyed by connection id
#[derive(Debug, Default)]
pub struct ClientManager {
    clients: HashMap<PlayerId, Client>,
}

impl ClientManager {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
        }
    }

    pub fn add_client(
        &mut self,
        id: PlayerId,
        addr: SocketAddr,
        sender: mpsc::Sender<ServerMessage>,
    ) {
        info!("Client {} connected from {}", id, addr);
        self.clients.insert(id.clone(), Client::new(id, addr, sender));
    }

    /// Drops a connection. Returns false if it was already gone.
    pub fn remove_client(&mut self, id: &str) -> bool {
        if let Some(client) = self.clients.remove(id) {
            info!(
                "Client {} disconnected after {:.1}s",
                client.id,
                client.connected_at.elapsed().as_secs_f32()
            );
            true
        } else {
            false
        }
    }

    pub fn send_to(&self, id: &str, message: ServerMessage) -> bool {
        match self.clients.get(id) {
            Some(client) => {
                let delivered = client.send(message);
                if !delivered {
                    debug!("Dropped message for connection {}", id);
                }
                delivered
            }
            None => false,
        }
    }

    /// Queues `message` for every client except `exclude`. Returns how many
    /// queues accepted it.
    pub fn broadcast(&self, message: &ServerMessage, exclude: Option<&str>) -> usize {
        self.clients
            .values()
            .filter(|client| Some(client.id.as_str()) != exclude)
            .filter(|client| client.send(message.clone()))
            .count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.clients.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
