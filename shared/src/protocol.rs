//! Wire vocabulary shared by the server and its clients.
//!
//! Every frame is one JSON object of the form `{"event": <name>, "data": <payload>}`
//! with camelCase event names. Delivery is at most once; nothing is acknowledged.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::grid::Position;

pub type PlayerId = String;

/// A peer as the server describes it to everyone else.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub x: i32,
    pub y: i32,
    pub player_id: PlayerId,
}

impl PlayerInfo {
    pub fn new(player_id: impl Into<PlayerId>, position: Position) -> Self {
        Self {
            x: position.x,
            y: position.y,
            player_id: player_id.into(),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Messages flowing from the server to clients.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    /// First frame on every connection: the id the server gave this client.
    Connected {
        #[serde(rename = "playerId")]
        player_id: PlayerId,
    },
    /// Every connected player, the receiver included. Sent once on connect.
    CurrentPlayers(HashMap<PlayerId, PlayerInfo>),
    FoodPosition(Position),
    NewPlayer(PlayerInfo),
    PlayerDisconnected(PlayerId),
    PlayerMoved(PlayerInfo),
}

/// Messages flowing from a client to the server.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Head cell after the latest simulated move.
    PlayerMovement(Position),
    /// Proposed food cell after eating the current one.
    NewFoodPosition(Position),
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl ClientMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_moved_wire_shape() {
        let message = ServerMessage::PlayerMoved(PlayerInfo::new("A", Position::new(6, 5)));
        let value: serde_json::Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({"event": "playerMoved", "data": {"x": 6, "y": 5, "playerId": "A"}})
        );
    }

    #[test]
    fn test_current_players_wire_shape() {
        let mut players = HashMap::new();
        players.insert("A".to_string(), PlayerInfo::new("A", Position::new(5, 5)));
        let message = ServerMessage::CurrentPlayers(players);
        let value: serde_json::Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();

        assert_eq!(value["event"], "currentPlayers");
        assert_eq!(value["data"]["A"], json!({"x": 5, "y": 5, "playerId": "A"}));
    }

    #[test]
    fn test_disconnect_and_connected_payloads() {
        let gone = ServerMessage::PlayerDisconnected("B".to_string());
        let value: serde_json::Value = serde_json::from_str(&gone.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"event": "playerDisconnected", "data": "B"}));

        let hello = ServerMessage::Connected {
            player_id: "C".to_string(),
        };
        let value: serde_json::Value = serde_json::from_str(&hello.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"event": "connected", "data": {"playerId": "C"}}));
    }

    #[test]
    fn test_client_messages_parse() {
        let movement =
            ClientMessage::from_json(r#"{"event":"playerMovement","data":{"x":6,"y":5}}"#);
        assert_eq!(
            movement.unwrap(),
            ClientMessage::PlayerMovement(Position::new(6, 5))
        );

        let food = ClientMessage::from_json(r#"{"event":"newFoodPosition","data":{"x":-1,"y":3}}"#);
        assert_eq!(
            food.unwrap(),
            ClientMessage::NewFoodPosition(Position::new(-1, 3))
        );
    }

    #[test]
    fn test_malformed_messages_rejected() {
        assert!(ClientMessage::from_json("not json").is_err());
        assert!(ClientMessage::from_json(r#"{"event":"teleport","data":{"x":1,"y":1}}"#).is_err());
        assert!(
            ClientMessage::from_json(r#"{"event":"playerMovement","data":{"x":"a"}}"#).is_err()
        );
        assert!(ServerMessage::from_json(r#"{"data":{"x":1,"y":1}}"#).is_err());
    }
}
