//! WebSocket room management for session-based message routing.
//!
//! Rooms are organized by session ID, allowing targeted broadcast of
//! session updates to every admitted participant connection.
//!
//! # Architecture
//!
//! ```text
//! Room: session-123    Room: session-456
//! ├── client-a         ├── client-d
//! ├── client-b         └── client-e
//! └── client-c
//! ```
//!
//! When an event occurs for session-123, only clients a, b, c receive it.

use std::collections::HashMap;

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::domain::foundation::{ParticipantId, SessionId};

use super::messages::SessionUpdate;

/// Unique identifier for a WebSocket client connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a new random client ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an admitted client sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
}

/// Manages WebSocket connection rooms organized by session.
///
/// Provides:
/// - Client join/leave operations
/// - Broadcast to all clients in a session room
/// - Automatic cleanup of empty rooms
///
/// Uses `RwLock` for the room registry since broadcasts (reads) vastly
/// outnumber joins/leaves (writes).
pub struct RoomManager {
    /// Map of session_id → broadcast sender for that room.
    rooms: RwLock<HashMap<SessionId, broadcast::Sender<SessionUpdate>>>,

    /// Map of client_id → seat for cleanup on disconnect.
    seats: RwLock<HashMap<ClientId, Seat>>,

    /// Channel capacity for each room's broadcast channel.
    channel_capacity: usize,
}

impl RoomManager {
    /// Create a new room manager with specified channel capacity.
    ///
    /// Slow clients that fall more than `channel_capacity` updates behind
    /// skip the oldest ones.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            seats: RwLock::new(HashMap::new()),
            channel_capacity,
        }
    }

    /// Admit a client to a session room, creating the room if needed.
    ///
    /// Returns a receiver for every update broadcast to that session.
    pub async fn join(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        client_id: ClientId,
    ) -> broadcast::Receiver<SessionUpdate> {
        let mut rooms = self.rooms.write().await;

        let sender = rooms.entry(*session_id).or_insert_with(|| {
            let (tx, _) = broadcast::channel(self.channel_capacity);
            tx
        });

        self.seats.write().await.insert(
            client_id,
            Seat {
                session_id: *session_id,
                participant_id: *participant_id,
            },
        );

        sender.subscribe()
    }

    /// Remove a client from its room. Returns where it sat, if anywhere.
    ///
    /// Call after the client's receiver has been dropped so an emptied
    /// room is cleaned up.
    pub async fn leave(&self, client_id: &ClientId) -> Option<Seat> {
        let seat = self.seats.write().await.remove(client_id)?;

        let mut rooms = self.rooms.write().await;
        if rooms
            .get(&seat.session_id)
            .is_some_and(|sender| sender.receiver_count() == 0)
        {
            rooms.remove(&seat.session_id);
        }

        Some(seat)
    }

    /// Broadcast an update to all clients in a session room.
    ///
    /// If no clients are in the room, this is a no-op.
    pub async fn broadcast_to_session(&self, session_id: &SessionId, update: SessionUpdate) {
        let rooms = self.rooms.read().await;

        if let Some(sender) = rooms.get(session_id) {
            // No receivers is fine
            let _ = sender.send(update);
        }
    }

    /// Number of live receivers in a session room.
    pub async fn client_count(&self, session_id: &SessionId) -> usize {
        let rooms = self.rooms.read().await;
        rooms
            .get(session_id)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }

    /// Get all active room IDs.
    pub async fn active_rooms(&self) -> Vec<SessionId> {
        self.rooms.read().await.keys().cloned().collect()
    }

    /// Get total count of admitted clients across all rooms.
    pub async fn total_client_count(&self) -> usize {
        self.seats.read().await.len()
    }
}
