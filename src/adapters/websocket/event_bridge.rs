//! Event bridge connecting domain events to WebSocket clients.
//!
//! Subscribes to every session event and broadcasts it to the clients
//! admitted to that session's room.
//!
//! # Event Flow
//!
//! ```text
//! Domain Event Published
//!          │
//!          ▼
//! ┌────────────────────────┐
//! │ WebSocketEventBridge   │
//! │  receives event        │
//! └────────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────────┐
//! │  Transform to          │
//! │  SessionUpdate         │
//! └────────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────────┐
//! │  Broadcast to the room │
//! │  named by aggregate_id │
//! └────────────────────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope, SessionId};
use crate::domain::session::{
    CardSelected, CardsRevealed, GameReset, ParticipantJoined, ParticipantUpdated,
    StatusChanged, SESSION_EVENT_TYPES,
};
use crate::ports::{EventHandler, EventSubscriber};

use super::messages::{SessionUpdate, SessionUpdateType};
use super::rooms::RoomManager;

/// Bridge between the event bus and WebSocket connections.
pub struct WebSocketEventBridge {
    room_manager: Arc<RoomManager>,
}

impl WebSocketEventBridge {
    pub fn new(room_manager: Arc<RoomManager>) -> Self {
        Self { room_manager }
    }

    /// Create as an Arc (for sharing with event subscriber).
    pub fn new_shared(room_manager: Arc<RoomManager>) -> Arc<Self> {
        Arc::new(Self::new(room_manager))
    }

    /// Register this bridge for every session event type.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let bridge = WebSocketEventBridge::new_shared(room_manager);
    /// bridge.register(event_bus.as_ref());
    /// ```
    pub fn register(self: &Arc<Self>, subscriber: &impl EventSubscriber) {
        subscriber.subscribe_all(SESSION_EVENT_TYPES, self.clone());
    }

    /// Transform a domain event envelope into a session update.
    ///
    /// Returns `None` for event types clients don't care about.
    fn transform(&self, event: &EventEnvelope) -> Option<SessionUpdate> {
        let update_type = match event.event_type.as_str() {
            ParticipantJoined::EVENT_TYPE => SessionUpdateType::ParticipantJoined,
            CardSelected::EVENT_TYPE => SessionUpdateType::CardSelected,
            CardsRevealed::EVENT_TYPE => SessionUpdateType::CardsRevealed,
            GameReset::EVENT_TYPE => SessionUpdateType::GameReset,
            ParticipantUpdated::EVENT_TYPE => SessionUpdateType::ParticipantUpdated,
            StatusChanged::EVENT_TYPE => SessionUpdateType::StatusChanged,
            _ => return None,
        };

        Some(SessionUpdate {
            update_type,
            data: event.payload.clone(),
            timestamp: event.occurred_at,
        })
    }
}

#[async_trait]
impl EventHandler for WebSocketEventBridge {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let Some(update) = self.transform(&event) else {
            return Ok(());
        };

        let Ok(session_id) = event.aggregate_id.parse::<SessionId>() else {
            tracing::debug!(
                event_type = %event.event_type,
                aggregate_id = %event.aggregate_id,
                "event has no session id, skipping broadcast"
            );
            return Ok(());
        };

        self.room_manager
            .broadcast_to_session(&session_id, update)
            .await;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "WebSocketEventBridge"
    }
}
