//! WebSocket adapters for live session updates.
//!
//! Pushes domain events to the participants of a session as they happen.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     InMemoryEventBus                                │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ subscribes
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    WebSocketEventBridge                             │
//! │   - Subscribes to every session event                               │
//! │   - Transforms EventEnvelope → SessionUpdate                        │
//! │   - Routes to the session's room                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ broadcasts
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      RoomManager                                    │
//! │   Room: session-123    Room: session-456    Room: session-789       │
//! │   ├── client-a         ├── client-d         ├── client-g            │
//! │   └── client-b         └── client-e         └── client-h            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Clients enter a room only after `confirm_join` names a participant of
//! that session.

pub mod event_bridge;
pub mod handler;
pub mod messages;
pub mod rooms;

pub use event_bridge::WebSocketEventBridge;
pub use handler::{live_routes, ws_handler, WebSocketState};
pub use messages::{
    ClientMessage, ConnectedMessage, ErrorMessage, JoinedMessage, PongMessage, ServerMessage,
    SessionUpdate, SessionUpdateMessage, SessionUpdateType,
};
pub use rooms::{ClientId, RoomManager, Seat};
