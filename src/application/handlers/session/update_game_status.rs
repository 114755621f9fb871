//! UpdateGameStatusHandler - Command handler for forcing the round status.

use std::sync::Arc;

use crate::domain::foundation::{EventId, SessionId, SessionStatus, Timestamp};
use crate::domain::session::{SessionError, StatusChanged};
use crate::ports::{AutoResetScheduler, EventPublisher, SessionStore};

use super::{load, publish_best_effort};

/// Command to set a session's status directly.
#[derive(Debug, Clone, Copy)]
pub struct UpdateGameStatusCommand {
    pub session_id: SessionId,
    pub status: SessionStatus,
}

/// Handler for direct status changes.
///
/// Any transition is allowed. Entering `Revealing` arms the auto-reset
/// timer; every other status disarms it.
pub struct UpdateGameStatusHandler {
    store: Arc<dyn SessionStore>,
    event_publisher: Arc<dyn EventPublisher>,
    scheduler: Arc<dyn AutoResetScheduler>,
}

impl UpdateGameStatusHandler {
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

    pub async fn handle(&self, cmd: UpdateGameStatusCommand) -> Result<(), SessionError> {
        let shared = load(self.store.as_ref(), &cmd.session_id).await?;

        {
            let mut session = shared.lock().await;
            session.set_status(cmd.status);
            if cmd.status.arms_auto_reset() {
                self.scheduler.schedule(cmd.session_id);
            } else {
                self.scheduler.cancel(&cmd.session_id);
            }
        }

        tracing::info!(session_id = %cmd.session_id, status = %cmd.status, "status updated");

        let event = StatusChanged {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            status: cmd.status,
            automatic: false,
            changed_at: Timestamp::now(),
        };
        publish_best_effort(self.event_publisher.as_ref(), &event).await;

        Ok(())
    }
}
