//! UpdateDisplayModeHandler - Command handler for toggling player/spectator.

use std::sync::Arc;

use crate::domain::foundation::{EventId, ParticipantId, SessionId, Timestamp};
use crate::domain::session::{DisplayMode, ParticipantUpdated, SessionError};
use crate::ports::{EventPublisher, SessionStore};

use super::{load, publish_best_effort};

/// Command to flip a participant's display mode.
#[derive(Debug, Clone, Copy)]
pub struct UpdateDisplayModeCommand {
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
}

/// Handler for toggling display mode. Returns the new mode.
pub struct UpdateDisplayModeHandler {
    store: Arc<dyn SessionStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateDisplayModeHandler {
    pub fn new(store: Arc<dyn SessionStore>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            store,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: UpdateDisplayModeCommand) -> Result<DisplayMode, SessionError> {
        let shared = load(self.store.as_ref(), &cmd.session_id).await?;

        let event = {
            let mut session = shared.lock().await;
            let display_mode = session.toggle_display_mode(&cmd.participant_id)?;
            let role = session.require_participant(&cmd.participant_id)?.role();

            ParticipantUpdated {
                event_id: EventId::new(),
                session_id: cmd.session_id,
                participant_id: cmd.participant_id,
                role,
                display_mode,
                updated_at: Timestamp::now(),
            }
        };

        tracing::debug!(
            session_id = %cmd.session_id,
            participant_id = %cmd.participant_id,
            display_mode = ?event.display_mode,
            "display mode toggled"
        );
        publish_best_effort(self.event_publisher.as_ref(), &event).await;

        Ok(event.display_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::session::test_support::{
        seeded_store, snapshot, MockEventPublisher,
    };

    #[tokio::test]
    async fn toggles_back_and_forth() {
        let (store, session_id, ids) = seeded_store(&["alice"]).await;
        let handler =
            UpdateDisplayModeHandler::new(store, Arc::new(MockEventPublisher::new()));
        let cmd = UpdateDisplayModeCommand {
            session_id,
            participant_id: ids[0],
        };

        assert_eq!(handler.handle(cmd).await.unwrap(), DisplayMode::Spectator);
        assert_eq!(handler.handle(cmd).await.unwrap(), DisplayMode::Player);
    }

    #[tokio::test]
    async fn becoming_spectator_discards_card() {
        let (store, session_id, ids) = seeded_store(&["alice"]).await;
        store
            .find_by_id(&session_id)
            .await
            .unwrap()
            .lock()
            .await
            .select_card(&ids[0], "5")
            .unwrap();
        let handler =
            UpdateDisplayModeHandler::new(store.clone(), Arc::new(MockEventPublisher::new()));

        handler
            .handle(UpdateDisplayModeCommand {
                session_id,
                participant_id: ids[0],
            })
            .await
            .unwrap();

        let session = snapshot(&store, &session_id).await;
        assert!(!session.participants()[0].has_selected());
    }

    #[tokio::test]
    async fn publishes_participant_updated() {
        let (store, session_id, ids) = seeded_store(&["alice"]).await;
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = UpdateDisplayModeHandler::new(store, publisher.clone());

        handler
            .handle(UpdateDisplayModeCommand {
                session_id,
                participant_id: ids[0],
            })
            .await
            .unwrap();

        let events = publisher.published_events();
        assert_eq!(events[0].event_type, ParticipantUpdated::EVENT_TYPE);
        assert_eq!(events[0].payload["displayMode"], "spectator");
        assert_eq!(events[0].payload["role"], "admin");
    }

    #[tokio::test]
    async fn unknown_participant_is_rejected() {
        let (store, session_id, _) = seeded_store(&["alice"]).await;
        let handler = UpdateDisplayModeHandler::new(store, Arc::new(MockEventPublisher::new()));

        let result = handler
            .handle(UpdateDisplayModeCommand {
                session_id,
                participant_id: ParticipantId::new(),
            })
            .await;

        assert!(matches!(
            result,
            Err(SessionError::ParticipantNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (store, _, ids) = seeded_store(&["alice"]).await;
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = UpdateDisplayModeHandler::new(store, publisher.clone());

        let result = handler
            .handle(UpdateDisplayModeCommand {
                session_id: SessionId::new(),
                participant_id: ids[0],
            })
            .await;

        assert!(matches!(result, Err(SessionError::NotFound(_))));
        assert!(publisher.published_events().is_empty());
    }
}
