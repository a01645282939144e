//! WebSocket server: connection tasks feeding a single-owner event loop

use crate::client_manager::{ClientManager, OUTGOING_BUFFER};
use crate::game::{GameState, Outbound};
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{ClientMessage, Grid, PlayerId, Position, ServerMessage};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

const CLIENT_ID_LEN: usize = 16;
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Startup options for the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on, e.g. `127.0.0.1:3000`
    pub addr: String,
    /// Seed for spawn cells and the initial food cell
    pub seed: Option<u64>,
    /// Initial food cell instead of a random one
    pub initial_food: Option<Position>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            seed: None,
            initial_food: None,
        }
    }
}

/// Events sent from connection tasks to the main server loop
#[derive(Debug)]
pub enum ServerEvent {
    Connected {
        client_id: PlayerId,
        addr: SocketAddr,
        sender: mpsc::Sender<ServerMessage>,
    },
    MessageReceived {
        client_id: PlayerId,
        message: ClientMessage,
    },
    Disconnected {
        client_id: PlayerId,
    },
}

/// Main server owning the registry, the food and every connection queue
pub struct Server {
    listener: TcpListener,
    game_state: GameState,
    clients: ClientManager,
    id_rng: StdRng,

    event_tx: mpsc::UnboundedSender<ServerEvent>,
    event_rx: mpsc::UnboundedReceiver<ServerEvent>,
}

impl Server {
    pub async fn bind(config: ServerConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(&config.addr).await?;
        info!("Server listening on {}", listener.local_addr()?);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = Grid::default();
        let game_state = match config.initial_food {
            Some(food) if grid.contains(food) => GameState::with_food(grid, food, rng),
            Some(food) => {
                warn!(
                    "Initial food ({}, {}) is off the grid, placing randomly",
                    food.x, food.y
                );
                GameState::new(grid, rng)
            }
            None => GameState::new(grid, rng),
        };

        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Ok(Server {
            listener,
            game_state,
            clients: ClientManager::new(),
            id_rng: StdRng::from_entropy(),
            event_tx,
            event_rx,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections and processes their events until the process ends.
    pub async fn run(self) {
        let Server {
            listener,
            mut game_state,
            mut clients,
            id_rng,
            event_tx,
            mut event_rx,
        } = self;

        tokio::spawn(accept_loop(listener, id_rng, event_tx));
        info!("Server started successfully");

        while let Some(event) = event_rx.recv().await {
            let outbound = match event {
                ServerEvent::Connected {
                    client_id,
                    addr,
                    sender,
                } => {
                    clients.add_client(client_id.clone(), addr, sender);
                    game_state.connect(&client_id)
                }
                ServerEvent::MessageReceived { client_id, message } => {
                    game_state.handle_message(&client_id, message)
                }
                ServerEvent::Disconnected { client_id } => {
                    clients.remove_client(&client_id);
                    game_state.disconnect(&client_id)
                }
            };

            deliver(&clients, outbound);
        }

        info!("Server shutting down");
    }
}

fn deliver(clients: &ClientManager, outbound: Vec<Outbound>) {
    for dispatch in outbound {
        match dispatch {
            Outbound::SendTo { client_id, message } => {
                clients.send_to(&client_id, message);
            }
            Outbound::Broadcast { message, exclude } => {
                clients.broadcast(&message, exclude.as_deref());
            }
        }
    }
}

fn generate_client_id<R: Rng + ?Sized>(rng: &mut R) -> PlayerId {
    rng.sample_iter(&Alphanumeric)
        .take(CLIENT_ID_LEN)
        .map(char::from)
        .collect()
}

async fn accept_loop(
    listener: TcpListener,
    mut id_rng: StdRng,
    event_tx: mpsc::UnboundedSender<ServerEvent>,
) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let client_id = generate_client_id(&mut id_rng);
                tokio::spawn(handle_connection(stream, addr, client_id, event_tx.clone()));
            }
            Err(e) => backoff_after_accept_error(&e).await,
        }
    }
}

/// Pauses before the next accept so a persistent failure (such as running
/// out of file descriptors) does not spin the loop.
async fn backoff_after_accept_error(e: &std::io::Error) {
    error!("Error accepting connection: {}", e);
    tokio::time::sleep(ACCEPT_BACKOFF).await;
}

/// Pumps one WebSocket: frames in become events, queued messages go out.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    client_id: PlayerId,
    event_tx: mpsc::UnboundedSender<ServerEvent>,
) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake with {} failed: {}", addr, e);
            return;
        }
    };

    let (mut ws_tx, mut ws_rx) = ws_stream.split();
    let (sender, mut outgoing) = mpsc::channel::<ServerMessage>(OUTGOING_BUFFER);

    if event_tx
        .send(ServerEvent::Connected {
            client_id: client_id.clone(),
            addr,
            sender,
        })
        .is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            Some(message) = outgoing.recv() => {
                match message.to_json() {
                    Ok(json) => {
                        if ws_tx.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => error!("Failed to encode message for {}: {}", client_id, e),
                }
            }

            frame = ws_rx.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => match ClientMessage::from_json(&text) {
                        Ok(message) => {
                            let event = ServerEvent::MessageReceived {
                                client_id: client_id.clone(),
                                message,
                            };
                            if event_tx.send(event).is_err() {
                                break;
                            }
                        }
                        Err(e) => debug!("Ignoring malformed frame from {}: {}", client_id, e),
                    },
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!("Connection {} errored: {}", client_id, e);
                        break;
                    }
                }
            }
        }
    }

    let _ = event_tx.send(ServerEvent::Disconnected { client_id });
}
