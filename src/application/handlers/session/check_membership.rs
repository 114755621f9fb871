//! CheckMembershipHandler - Query handler answering "is this participant seated here?".
//!
//! Used by the live transport to admit a socket to a session room.

use std::sync::Arc;

use crate::domain::foundation::{ParticipantId, SessionId};
use crate::ports::SessionStore;

/// Query for session membership.
#[derive(Debug, Clone, Copy)]
pub struct IsParticipantQuery {
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
}

/// Handler for membership checks.
pub struct CheckMembershipHandler {
    store: Arc<dyn SessionStore>,
}

impl CheckMembershipHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Never fails: an unknown session simply has no members.
    pub async fn handle(&self, query: IsParticipantQuery) -> bool {
        match self.store.find_by_id(&query.session_id).await {
            Some(shared) => shared.lock().await.has_participant(&query.participant_id),
            None => false,
        }
    }
}
