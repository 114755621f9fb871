//! WebSocket message types for live session updates.
//!
//! Defines the protocol between server and connected clients:
//! - Server → Client: Connection status, join confirmation, session updates, errors, pongs
//! - Client → Server: Pings, join confirmation

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Socket accepted; the client still has to confirm who it is.
    Connected(ConnectedMessage),

    /// `confirm_join` succeeded and the client now receives session updates.
    Joined(JoinedMessage),

    /// Session update notification.
    #[serde(rename = "session.update")]
    SessionUpdate(SessionUpdateMessage),

    /// Error occurred.
    Error(ErrorMessage),

    /// Heartbeat response.
    Pong(PongMessage),
}

/// Sent when the socket is accepted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub session_id: String,
    pub client_id: String,
    pub timestamp: String,
}

/// Sent when the client has been admitted to the session room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedMessage {
    pub session_id: String,
    pub participant_id: String,
    pub timestamp: String,
}

/// Session update notification with typed payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdateMessage {
    pub update_type: SessionUpdateType,
    pub data: serde_json::Value,
    pub timestamp: String,
}

/// Types of session updates that can be sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionUpdateType {
    ParticipantJoined,
    /// A participant's live connection was admitted.
    ParticipantConnected,
    /// A participant's live connection closed.
    ParticipantDisconnected,
    CardSelected,
    CardsRevealed,
    GameReset,
    /// Role or display mode changed.
    ParticipantUpdated,
    StatusChanged,
}

/// Error message sent to client.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorMessage {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Timestamp::now().to_rfc3339(),
        }
    }
}

/// Heartbeat response.
#[derive(Debug, Clone, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Heartbeat request.
    Ping,

    /// Claim a seat in the session. Admission is checked against the roster.
    ConfirmJoin {
        #[serde(rename = "participantId")]
        participant_id: String,
    },
}

// ============================================
// Internal Types
// ============================================

/// Internal representation of a session update for broadcasting.
///
/// This is what the event bridge creates and sends to rooms.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub update_type: SessionUpdateType,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl SessionUpdate {
    pub fn new(update_type: SessionUpdateType, data: serde_json::Value) -> Self {
        Self {
            update_type,
            data,
            timestamp: Timestamp::now(),
        }
    }

    /// Convert to a server message for sending to clients.
    pub fn to_server_message(self) -> ServerMessage {
        ServerMessage::SessionUpdate(SessionUpdateMessage {
            update_type: self.update_type,
            data: self.data,
            timestamp: self.timestamp.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_message_serializes_with_type_tag() {
        let msg = ServerMessage::Pong(PongMessage {
            timestamp: "2026-01-01T00:00:00Z".to_string(),
        });

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "pong");
    }

    #[test]
    fn session_update_message_serializes_correctly() {
        let msg = SessionUpdate::new(
            SessionUpdateType::CardsRevealed,
            json!({"average": 4.0}),
        )
        .to_server_message();

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "session.update");
        assert_eq!(json["updateType"], "cards_revealed");
        assert_eq!(json["data"]["average"], 4.0);
    }

    #[test]
    fn joined_message_is_camel_case() {
        let msg = ServerMessage::Joined(JoinedMessage {
            session_id: "s".into(),
            participant_id: "p".into(),
            timestamp: "t".into(),
        });

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "joined");
        assert_eq!(json["participantId"], "p");
    }

    #[test]
    fn client_message_deserializes_ping() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type": "ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn client_message_deserializes_confirm_join() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type": "confirm_join", "participantId": "abc"}"#).unwrap();
        match msg {
            ClientMessage::ConfirmJoin { participant_id } => assert_eq!(participant_id, "abc"),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn confirm_join_requires_participant_id() {
        let result = serde_json::from_str::<ClientMessage>(r#"{"type": "confirm_join"}"#);
        assert!(result.is_err());
    }
}
