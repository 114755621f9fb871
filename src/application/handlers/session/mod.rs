//! Session command and query handlers.
//!
//! Every handler locks at most one session, mutates it, arms or cancels
//! the auto-reset timer while the lock is still held, then publishes its
//! event after the lock is released.

mod check_membership;
mod convert_to_admin;
mod create_session;
mod get_participant;
mod get_session;
mod join_session;
mod reset_game;
mod reveal_cards;
mod select_card;
mod update_display_mode;
mod update_game_status;

#[cfg(test)]
pub(crate) mod test_support;

pub use check_membership::{CheckMembershipHandler, IsParticipantQuery};
pub use convert_to_admin::{ConvertToAdminCommand, ConvertToAdminHandler};
pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use get_participant::{GetParticipantHandler, GetParticipantQuery, ParticipantView};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use join_session::{JoinSessionCommand, JoinSessionHandler, JoinSessionResult};
pub use reset_game::{ResetGameCommand, ResetGameHandler};
pub use reveal_cards::{RevealCardsCommand, RevealCardsHandler};
pub use select_card::{SelectCardCommand, SelectCardHandler};
pub use update_display_mode::{UpdateDisplayModeCommand, UpdateDisplayModeHandler};
pub use update_game_status::{UpdateGameStatusCommand, UpdateGameStatusHandler};

use serde::Serialize;

use crate::domain::foundation::{DomainEvent, EventEnvelope, SessionId};
use crate::domain::session::SessionError;
use crate::ports::{EventPublisher, SessionStore, SharedSession};

/// Fetch a session handle or fail with `NotFound`.
async fn load(store: &dyn SessionStore, id: &SessionId) -> Result<SharedSession, SessionError> {
    store
        .find_by_id(id)
        .await
        .ok_or_else(|| SessionError::not_found(*id))
}

/// Publish an event, logging instead of failing.
///
/// The state change has already happened by the time this runs; a lost
/// notification must not turn a successful operation into an error.
async fn publish_best_effort<E>(publisher: &dyn EventPublisher, event: &E)
where
    E: DomainEvent + Serialize,
{
    let envelope = match EventEnvelope::from_event(event) {
        Ok(envelope) => envelope,
        Err(error) => {
            tracing::warn!(event_type = event.event_type(), %error, "failed to encode event");
            return;
        }
    };

    if let Err(error) = publisher.publish(envelope).await {
        tracing::warn!(
            event_type = event.event_type(),
            session_id = %event.aggregate_id(),
            %error,
            "failed to publish event"
        );
    }
}
