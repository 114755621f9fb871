//! ResetGameHandler - Command handler for starting a fresh round.

use std::sync::Arc;

use crate::domain::foundation::{EventId, SessionId, Timestamp};
use crate::domain::session::{GameReset, SessionError};
use crate::ports::{AutoResetScheduler, EventPublisher, SessionStore};

use super::{load, publish_best_effort};

/// Command to reset a session.
#[derive(Debug, Clone, Copy)]
pub struct ResetGameCommand {
    pub session_id: SessionId,
}

/// Handler for resetting sessions.
///
/// Clears every card and the last result, returns to `AwaitingReveal` and
/// disarms a pending auto-reset.
pub struct ResetGameHandler {
    store: Arc<dyn SessionStore>,
    event_publisher: Arc<dyn EventPublisher>,
    scheduler: Arc<dyn AutoResetScheduler>,
}

impl ResetGameHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        event_publisher: Arc<dyn EventPublisher>,
        scheduler: Arc<dyn AutoResetScheduler>,
    ) -> Self {
        Self {
            store,
            event_publisher,
            scheduler,
        }
    }

    pub async fn handle(&self, cmd: ResetGameCommand) -> Result<(), SessionError> {
        let shared = load(self.store.as_ref(), &cmd.session_id).await?;

        {
            let mut session = shared.lock().await;
            session.reset();
            self.scheduler.cancel(&cmd.session_id);
        }

        tracing::info!(session_id = %cmd.session_id, "game reset");

        let event = GameReset {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            reset_at: Timestamp::now(),
        };
        publish_best_effort(self.event_publisher.as_ref(), &event).await;

        Ok(())
    }
}
