//! JoinSessionHandler - Command handler for seating a participant.

use std::sync::Arc;

use crate::domain::foundation::{EventId, ParticipantId, SessionId};
use crate::domain::session::{DisplayMode, ParticipantJoined, ParticipantRole, SessionError};
use crate::ports::{EventPublisher, SessionStore};

use super::{load, publish_best_effort};

/// Command to join a session.
#[derive(Debug, Clone)]
pub struct JoinSessionCommand {
    pub session_id: SessionId,
    pub name: String,
    /// Defaults to `Player` when absent.
    pub display_mode: Option<DisplayMode>,
}

/// Result of a successful join.
#[derive(Debug, Clone)]
pub struct JoinSessionResult {
    pub participant_id: ParticipantId,
    pub role: ParticipantRole,
    pub event: ParticipantJoined,
}

/// Handler for joining sessions.
pub struct JoinSessionHandler {
    store: Arc<dyn SessionStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl JoinSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            store,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: JoinSessionCommand) -> Result<JoinSessionResult, SessionError> {
        let shared = load(self.store.as_ref(), &cmd.session_id).await?;

        // Role is derived from the participant count under the same lock
        // as the append, so concurrent joins see a consistent table.
        let event = {
            let mut session = shared.lock().await;
            let participant =
                session.add_participant(&cmd.name, cmd.display_mode.unwrap_or_default())?;

            ParticipantJoined {
                event_id: EventId::new(),
                session_id: cmd.session_id,
                participant_id: participant.id(),
                name: participant.name().to_string(),
                role: participant.role(),
                display_mode: participant.display_mode(),
                joined_at: *participant.joined_at(),
            }
        };

        tracing::info!(
            session_id = %event.session_id,
            participant_id = %event.participant_id,
            role = ?event.role,
            "participant joined"
        );
        publish_best_effort(self.event_publisher.as_ref(), &event).await;

        Ok(JoinSessionResult {
            participant_id: event.participant_id,
            role: event.role,
            event,
        })
    }
}
