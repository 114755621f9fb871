//! ConvertToAdminHandler - Command handler for granting admin rights.

use std::sync::Arc;

use crate::domain::foundation::{EventId, ParticipantId, SessionId, Timestamp};
use crate::domain::session::{ParticipantUpdated, SessionError};
use crate::ports::{EventPublisher, SessionStore};

use super::{load, publish_best_effort};

/// Command to make a participant an admin.
#[derive(Debug, Clone, Copy)]
pub struct ConvertToAdminCommand {
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
}

/// Handler for promoting participants. Grant-only; nobody is demoted.
pub struct ConvertToAdminHandler {
    store: Arc<dyn SessionStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ConvertToAdminHandler {
    pub fn new(store: Arc<dyn SessionStore>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            store,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: ConvertToAdminCommand) -> Result<(), SessionError> {
        let shared = load(self.store.as_ref(), &cmd.session_id).await?;

        let event = {
            let mut session = shared.lock().await;
            session.promote_to_admin(&cmd.participant_id)?;
            let participant = session.require_participant(&cmd.participant_id)?;

            ParticipantUpdated {
                event_id: EventId::new(),
                session_id: cmd.session_id,
                participant_id: cmd.participant_id,
                role: participant.role(),
                display_mode: participant.display_mode(),
                updated_at: Timestamp::now(),
            }
        };

        tracing::info!(
            session_id = %cmd.session_id,
            participant_id = %cmd.participant_id,
            "participant promoted to admin"
        );
        publish_best_effort(self.event_publisher.as_ref(), &event).await;

        Ok(())
    }
}
