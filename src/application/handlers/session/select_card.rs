//! SelectCardHandler - Command handler for picking a card.

use std::sync::Arc;

use crate::domain::foundation::{EventId, ParticipantId, SessionId, Timestamp};
use crate::domain::session::{CardSelected, SessionError};
use crate::ports::{EventPublisher, SessionStore};

use super::{load, publish_best_effort};

/// Command to record a participant's card.
#[derive(Debug, Clone)]
pub struct SelectCardCommand {
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
    /// Stored verbatim; any string is a legal card.
    pub token: String,
}

/// Handler for selecting cards.
pub struct SelectCardHandler {
    store: Arc<dyn SessionStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SelectCardHandler {
    pub fn new(store: Arc<dyn SessionStore>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            store,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: SelectCardCommand) -> Result<(), SessionError> {
        let shared = load(self.store.as_ref(), &cmd.session_id).await?;
        shared
            .lock()
            .await
            .select_card(&cmd.participant_id, cmd.token)?;

        tracing::debug!(
            session_id = %cmd.session_id,
            participant_id = %cmd.participant_id,
            "card selected"
        );

        let event = CardSelected {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            participant_id: cmd.participant_id,
            selected_at: Timestamp::now(),
        };
        publish_best_effort(self.event_publisher.as_ref(), &event).await;

        Ok(())
    }
}
