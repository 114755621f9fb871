//! GetParticipantHandler - Query handler for one participant.

use std::sync::Arc;

use crate::domain::foundation::{ParticipantId, SessionId};
use crate::domain::session::{Participant, SessionError};
use crate::ports::SessionStore;

use super::load;

/// Query to get one participant of a session.
#[derive(Debug, Clone, Copy)]
pub struct GetParticipantQuery {
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
    /// Who is asking. Only the participant themself sees a hidden card.
    pub viewer: Option<ParticipantId>,
}

/// A participant plus whether the caller may see their card.
#[derive(Debug, Clone)]
pub struct ParticipantView {
    pub participant: Participant,
    pub card_visible: bool,
}

/// Handler for retrieving a participant.
///
/// Follows the same masking rule as the session view: while cards are
/// hidden, the card is visible only to the participant themself.
pub struct GetParticipantHandler {
    store: Arc<dyn SessionStore>,
}

impl GetParticipantHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetParticipantQuery) -> Result<ParticipantView, SessionError> {
        let shared = load(self.store.as_ref(), &query.session_id).await?;
        let session = shared.lock().await;
        let participant = session.require_participant(&query.participant_id)?.clone();
        let card_visible =
            !session.status().hides_cards() || query.viewer == Some(query.participant_id);
        Ok(ParticipantView {
            participant,
            card_visible,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::session::test_support::seeded_store;

    async fn with_card(token: &str) -> (GetParticipantHandler, SessionId, Vec<ParticipantId>) {
        let (store, session_id, ids) = seeded_store(&["alice", "bob"]).await;
        store
            .find_by_id(&session_id)
            .await
            .unwrap()
            .lock()
            .await
            .select_card(&ids[0], token)
            .unwrap();
        (GetParticipantHandler::new(store), session_id, ids)
    }

    #[tokio::test]
    async fn participant_sees_own_card() {
        let (handler, session_id, ids) = with_card("5").await;

        let view = handler
            .handle(GetParticipantQuery {
                session_id,
                participant_id: ids[0],
                viewer: Some(ids[0]),
            })
            .await
            .unwrap();

        assert_eq!(view.participant.name(), "alice");
        assert_eq!(view.participant.card_selected(), Some("5"));
        assert!(view.card_visible);
    }

    #[tokio::test]
    async fn others_cannot_see_card_before_reveal() {
        let (handler, session_id, ids) = with_card("5").await;

        for viewer in [None, Some(ids[1])] {
            let view = handler
                .handle(GetParticipantQuery {
                    session_id,
                    participant_id: ids[0],
                    viewer,
                })
                .await
                .unwrap();

            assert!(view.participant.has_selected());
            assert!(!view.card_visible);
        }
    }

    #[tokio::test]
    async fn card_is_visible_to_everyone_after_reveal() {
        let (store, session_id, ids) = seeded_store(&["alice"]).await;
        {
            let shared = store.find_by_id(&session_id).await.unwrap();
            let mut session = shared.lock().await;
            session.select_card(&ids[0], "8").unwrap();
            session.reveal();
        }
        let handler = GetParticipantHandler::new(store);

        let view = handler
            .handle(GetParticipantQuery {
                session_id,
                participant_id: ids[0],
                viewer: None,
            })
            .await
            .unwrap();

        assert!(view.card_visible);
    }

    #[tokio::test]
    async fn unknown_session_is_session_not_found() {
        let (store, _, ids) = seeded_store(&["alice"]).await;
        let handler = GetParticipantHandler::new(store);

        let result = handler
            .handle(GetParticipantQuery {
                session_id: SessionId::new(),
                participant_id: ids[0],
                viewer: None,
            })
            .await;

        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[tokio::test]
    async fn unknown_participant_is_participant_not_found() {
        let (store, session_id, _) = seeded_store(&["alice"]).await;
        let handler = GetParticipantHandler::new(store);
        let stranger = ParticipantId::new();

        let result = handler
            .handle(GetParticipantQuery {
                session_id,
                participant_id: stranger,
                viewer: None,
            })
            .await;

        assert_eq!(
            result.unwrap_err(),
            SessionError::participant_not_found(session_id, stranger)
        );
    }
}
