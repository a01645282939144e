//! Network session running beside the frame loop
//!
//! The frame loop never awaits. It hands outgoing messages to an unbounded
//! queue and drains incoming ones once per frame; a dedicated thread with its
//! own tokio runtime owns the WebSocket.

use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info};
use shared::{ClientMessage, ServerMessage};
use std::thread;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

pub type SessionError = Box<dyn std::error::Error + Send + Sync>;

/// The frame loop's side of the network session
pub struct NetworkHandle {
    outgoing: mpsc::UnboundedSender<ClientMessage>,
    incoming: mpsc::UnboundedReceiver<ServerMessage>,
}

impl NetworkHandle {
    pub fn new(
        outgoing: mpsc::UnboundedSender<ClientMessage>,
        incoming: mpsc::UnboundedReceiver<ServerMessage>,
    ) -> Self {
        Self { outgoing, incoming }
    }

    /// Queues a message. Returns false once the session has ended.
    pub fn send(&self, message: ClientMessage) -> bool {
        self.outgoing.send(message).is_ok()
    }

    /// Everything received since the last call, without blocking.
    pub fn drain(&mut self) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.incoming.try_recv() {
            messages.push(message);
        }
        messages
    }
}

/// Starts the session on its own thread and returns the frame loop's handle.
pub fn spawn_network_thread(url: String) -> NetworkHandle {
    let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();
    let (incoming_tx, incoming_rx) = mpsc::unbounded_channel();

    thread::spawn(move || {
        let runtime = match Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("Failed to start network runtime: {}", e);
                return;
            }
        };

        if let Err(e) = runtime.block_on(run_session(url, outgoing_rx, incoming_tx)) {
            error!("Network session ended: {}", e);
        }
    });

    NetworkHandle::new(outgoing_tx, incoming_rx)
}

/// Connects to `url` and shuttles messages until either side goes away.
pub async fn run_session(
    url: String,
    mut outgoing: mpsc::UnboundedReceiver<ClientMessage>,
    incoming: mpsc::UnboundedSender<ServerMessage>,
) -> Result<(), SessionError> {
    info!("Connecting to {}", url);
    let (ws_stream, _) = connect_async(url.as_str()).await?;
    info!("Connected to {}", url);

    let (mut ws_tx, mut ws_rx) = ws_stream.split();

    loop {
        tokio::select! {
            message = outgoing.recv() => {
                match message {
                    Some(message) => {
                        let json = message.to_json()?;
                        ws_tx.send(Message::Text(json.into())).await?;
                    }
                    None => {
                        let _ = ws_tx.send(Message::Close(None)).await;
                        break;
                    }
                }
            }

            frame = ws_rx.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => match ServerMessage::from_json(&text) {
                        Ok(message) => {
                            if incoming.send(message).is_err() {
                                break;
                            }
                        }
                        Err(e) => debug!("Ignoring malformed frame: {}", e),
                    },
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Server closed the connection");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                }
            }
        }
    }

    Ok(())
}
