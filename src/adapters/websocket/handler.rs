//! WebSocket upgrade handler for live session connections.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Validate the session id and upgrade
//! 2. Send `connected`
//! 3. Wait for `confirm_join` and check the participant against the roster
//! 4. Forward room broadcasts until disconnect
//! 5. Leave the room and tell the others

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use serde_json::json;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::adapters::http::session::ErrorResponse;
use crate::application::handlers::session::{CheckMembershipHandler, IsParticipantQuery};
use crate::domain::foundation::{ParticipantId, SessionId, Timestamp};

use super::{
    messages::{
        ClientMessage, ConnectedMessage, ErrorMessage, JoinedMessage, PongMessage, ServerMessage,
        SessionUpdate, SessionUpdateType,
    },
    rooms::{ClientId, RoomManager},
};

/// Outbound messages buffered per connection before the writer applies backpressure.
const OUTBOUND_BUFFER: usize = 64;

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    /// Room manager for session-based routing.
    pub room_manager: Arc<RoomManager>,
    /// Roster check for `confirm_join`.
    pub membership: Arc<CheckMembershipHandler>,
}

impl WebSocketState {
    pub fn new(room_manager: Arc<RoomManager>, membership: Arc<CheckMembershipHandler>) -> Self {
        Self {
            room_manager,
            membership,
        }
    }
}

/// Handle WebSocket upgrade requests for a session.
///
/// Route: `GET /api/sessions/:id/live`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(session_id): Path<String>,
    State(state): State<WebSocketState>,
) -> Response {
    let session_id: SessionId = match session_id.parse() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, session_id, state))
}

/// Handle an established WebSocket connection.
async fn handle_socket(socket: WebSocket, session_id: SessionId, state: WebSocketState) {
    let (sink, mut receiver) = socket.split();
    let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_BUFFER);
    let mut writer = tokio::spawn(write_messages(sink, outbound_rx));

    let mut connection = LiveConnection::new(session_id, state, outbound_tx);
    tracing::debug!(%session_id, client_id = %connection.client_id, "websocket connected");
    connection.send_connected().await;

    loop {
        tokio::select! {
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => connection.on_text(&text).await,
                Some(Ok(Message::Binary(_))) => {
                    connection
                        .send(ServerMessage::Error(ErrorMessage::new(
                            "UNSUPPORTED_MESSAGE",
                            "Binary frames are not supported",
                        )))
                        .await;
                }
                // Protocol-level ping/pong is answered by axum
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    tracing::debug!(client_id = %connection.client_id, error = %e, "receive error");
                    break;
                }
            },
            _ = &mut writer => break,
        }
    }

    connection.close().await;
    writer.abort();
}

/// Drain the outbound queue into the socket.
async fn write_messages(
    mut sink: SplitSink<WebSocket, Message>,
    mut outbound: mpsc::Receiver<ServerMessage>,
) {
    while let Some(message) = outbound.recv().await {
        let text = match serde_json::to_string(&message) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode server message");
                continue;
            }
        };
        if let Err(e) = sink.send(Message::Text(text)).await {
            tracing::debug!(error = %e, "send error, closing connection");
            break;
        }
    }
}

/// Per-socket state, independent of the socket itself.
struct LiveConnection {
    session_id: SessionId,
    client_id: ClientId,
    state: WebSocketState,
    outbound: mpsc::Sender<ServerMessage>,
    admitted: Option<Admission>,
}

struct Admission {
    participant_id: ParticipantId,
    forwarder: JoinHandle<()>,
}

impl LiveConnection {
    fn new(
        session_id: SessionId,
        state: WebSocketState,
        outbound: mpsc::Sender<ServerMessage>,
    ) -> Self {
        Self {
            session_id,
            client_id: ClientId::new(),
            state,
            outbound,
            admitted: None,
        }
    }

    async fn send(&self, message: ServerMessage) {
        // A closed queue means the writer is gone; the read loop ends next.
        let _ = self.outbound.send(message).await;
    }

    async fn send_connected(&self) {
        self.send(ServerMessage::Connected(ConnectedMessage {
            session_id: self.session_id.to_string(),
            client_id: self.client_id.to_string(),
            timestamp: Timestamp::now().to_rfc3339(),
        }))
        .await;
    }

    async fn on_text(&mut self, text: &str) {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(ClientMessage::Ping) => {
                self.send(ServerMessage::Pong(PongMessage {
                    timestamp: Timestamp::now().to_rfc3339(),
                }))
                .await;
            }
            Ok(ClientMessage::ConfirmJoin { participant_id }) => {
                self.confirm_join(&participant_id).await;
            }
            Err(e) => {
                tracing::debug!(client_id = %self.client_id, error = %e, "unreadable client message");
                self.send(ServerMessage::Error(ErrorMessage::new(
                    "INVALID_MESSAGE",
                    "Message could not be parsed",
                )))
                .await;
            }
        }
    }

    async fn confirm_join(&mut self, raw_participant_id: &str) {
        if self.admitted.is_some() {
            self.send(ServerMessage::Error(ErrorMessage::new(
                "ALREADY_JOINED",
                "This connection has already joined",
            )))
            .await;
            return;
        }

        let participant_id = match raw_participant_id.parse::<ParticipantId>() {
            Ok(id) => id,
            Err(_) => {
                self.send(ServerMessage::Error(ErrorMessage::new(
                    "BAD_REQUEST",
                    "Invalid participant ID",
                )))
                .await;
                return;
            }
        };

        let is_member = self
            .state
            .membership
            .handle(IsParticipantQuery {
                session_id: self.session_id,
                participant_id,
            })
            .await;
        if !is_member {
            tracing::debug!(
                session_id = %self.session_id,
                %participant_id,
                "confirm_join rejected"
            );
            self.send(ServerMessage::Error(ErrorMessage::new(
                "NOT_A_PARTICIPANT",
                "Participant is not part of this session",
            )))
            .await;
            return;
        }

        let room_rx = self
            .state
            .room_manager
            .join(&self.session_id, &participant_id, self.client_id.clone())
            .await;
        let forwarder = tokio::spawn(forward_updates(
            room_rx,
            self.outbound.clone(),
            self.client_id.clone(),
        ));
        self.admitted = Some(Admission {
            participant_id,
            forwarder,
        });

        self.send(ServerMessage::Joined(JoinedMessage {
            session_id: self.session_id.to_string(),
            participant_id: participant_id.to_string(),
            timestamp: Timestamp::now().to_rfc3339(),
        }))
        .await;

        tracing::info!(
            session_id = %self.session_id,
            %participant_id,
            client_id = %self.client_id,
            "participant connected"
        );
        self.state
            .room_manager
            .broadcast_to_session(
                &self.session_id,
                SessionUpdate::new(
                    SessionUpdateType::ParticipantConnected,
                    json!({ "participantId": participant_id.to_string() }),
                ),
            )
            .await;
    }

    /// Leave the room (if admitted) and tell the remaining clients.
    async fn close(self) {
        let Some(admission) = self.admitted else {
            return;
        };

        admission.forwarder.abort();
        // Wait for the receiver to drop so an emptied room is removed
        let _ = admission.forwarder.await;

        self.state.room_manager.leave(&self.client_id).await;
        self.state
            .room_manager
            .broadcast_to_session(
                &self.session_id,
                SessionUpdate::new(
                    SessionUpdateType::ParticipantDisconnected,
                    json!({ "participantId": admission.participant_id.to_string() }),
                ),
            )
            .await;

        let remaining = self.state.room_manager.client_count(&self.session_id).await;
        tracing::info!(
            session_id = %self.session_id,
            participant_id = %admission.participant_id,
            remaining,
            "participant disconnected"
        );
    }
}

/// Copy room broadcasts into a connection's outbound queue.
async fn forward_updates(
    mut room_rx: broadcast::Receiver<SessionUpdate>,
    outbound: mpsc::Sender<ServerMessage>,
    client_id: ClientId,
) {
    loop {
        match room_rx.recv().await {
            Ok(update) => {
                if outbound.send(update.to_server_message()).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(%client_id, skipped, "client lagging, updates dropped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Router for the live endpoint. Mount under `/api/sessions`.
pub fn live_routes(state: WebSocketState) -> Router {
    Router::new()
        .route("/:id/live", get(ws_handler))
        .with_state(state)
}
