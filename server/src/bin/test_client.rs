//! Headless probe: joins a server, walks right from its spawn cell, and prints
//! every event it receives.

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use shared::{ClientMessage, Direction, Grid, Position, ServerMessage};
use std::time::Duration;
use tokio::time::{interval, sleep};
use tokio_tungstenite::{connect_async, tungstenite::Message};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// WebSocket URL of the server
    #[arg(short, long, default_value = "ws://127.0.0.1:3000")]
    server: String,

    /// Number of moves to report before leaving
    #[arg(short, long, default_value = "20")]
    moves: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let grid = Grid::default();

    println!("Connecting to {}", args.server);
    let (ws_stream, _) = connect_async(args.server.as_str()).await?;
    let (mut ws_tx, mut ws_rx) = ws_stream.split();

    let mut own_id: Option<String> = None;
    let mut head: Option<Position> = None;
    let mut moves_sent = 0;
    let mut step = interval(Duration::from_millis(200));

    while moves_sent < args.moves {
        tokio::select! {
            frame = ws_rx.next() => {
                let text = match frame {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e.into()),
                    None => {
                        println!("Server closed the connection");
                        return Ok(());
                    }
                };

                match ServerMessage::from_json(&text) {
                    Ok(ServerMessage::Connected { player_id }) => {
                        println!("Connected as {}", player_id);
                        own_id = Some(player_id);
                    }
                    Ok(ServerMessage::CurrentPlayers(players)) => {
                        println!("{} player(s) online", players.len());
                        if let Some(info) = own_id.as_ref().and_then(|id| players.get(id)) {
                            head = Some(info.position());
                        }
                    }
                    Ok(other) => println!("Received: {:?}", other),
                    Err(e) => println!("Undecodable frame ({}): {}", e, text),
                }
            }

            _ = step.tick() => {
                if let Some(current) = head {
                    let next = grid.step(current, Direction::Right);
                    let json = ClientMessage::PlayerMovement(next).to_json()?;
                    ws_tx.send(Message::Text(json.into())).await?;
                    head = Some(next);
                    moves_sent += 1;
                    println!("Moved to ({}, {})", next.x, next.y);
                }
            }
        }
    }

    ws_tx.send(Message::Close(None)).await?;
    sleep(Duration::from_millis(100)).await;
    println!("Test client finished");

    Ok(())
}
