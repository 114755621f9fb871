//! GetSessionHandler - Query handler for a session snapshot.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionStore;

use super::load;

/// Query to get a session by ID.
#[derive(Debug, Clone, Copy)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for retrieving session details.
///
/// Returns a point-in-time copy; card masking is up to the caller.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<Session, SessionError> {
        let shared = load(self.store.as_ref(), &query.session_id).await?;
        let session = shared.lock().await.clone();
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::session::test_support::seeded_store;

    #[tokio::test]
    async fn returns_snapshot_of_existing_session() {
        let (store, session_id, ids) = seeded_store(&["alice", "bob"]).await;
        let handler = GetSessionHandler::new(store);

        let session = handler.handle(GetSessionQuery { session_id }).await.unwrap();

        assert_eq!(session.id(), &session_id);
        assert_eq!(session.name(), "Sprint 1");
        let seated: Vec<_> = session.participants().iter().map(|p| p.id()).collect();
        assert_eq!(seated, ids);
    }

    #[tokio::test]
    async fn fails_for_unknown_session() {
        let (store, _, _) = seeded_store(&[]).await;
        let handler = GetSessionHandler::new(store);
        let missing = SessionId::new();

        let result = handler.handle(GetSessionQuery { session_id: missing }).await;

        assert_eq!(result.unwrap_err(), SessionError::NotFound(missing));
    }
}
