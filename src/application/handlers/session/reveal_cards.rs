//! RevealCardsHandler - Command handler for tallying a round.

use std::sync::Arc;

use crate::domain::foundation::{EventId, SessionId, Timestamp};
use crate::domain::session::{CardsRevealed, RevealResult, SessionError};
use crate::ports::{AutoResetScheduler, EventPublisher, SessionStore};

use super::{load, publish_best_effort};

/// Command to reveal the cards of a session.
#[derive(Debug, Clone, Copy)]
pub struct RevealCardsCommand {
    pub session_id: SessionId,
}

/// Handler for revealing cards.
///
/// Tallies the players' cards, leaves the session in `ResettingSoon` and
/// arms the auto-reset timer. Returns without waiting for the timer.
pub struct RevealCardsHandler {
    store: Arc<dyn SessionStore>,
    event_publisher: Arc<dyn EventPublisher>,
    scheduler: Arc<dyn AutoResetScheduler>,
}

impl RevealCardsHandler {
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

    pub async fn handle(&self, cmd: RevealCardsCommand) -> Result<RevealResult, SessionError> {
        let shared = load(self.store.as_ref(), &cmd.session_id).await?;

        let result = {
            let mut session = shared.lock().await;
            let result = session.reveal();
            self.scheduler.schedule(cmd.session_id);
            result
        };

        tracing::info!(
            session_id = %cmd.session_id,
            votes = result.vote_count(),
            average = ?result.average,
            "cards revealed"
        );

        let event = CardsRevealed {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            average: result.average,
            score_cards: result.score_cards.clone(),
            revealed_at: Timestamp::now(),
        };
        publish_best_effort(self.event_publisher.as_ref(), &event).await;

        Ok(result)
    }
}
