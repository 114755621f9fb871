//! CreateSessionHandler - Command handler for opening a new estimation table.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionStore;

/// Command to create a new session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub name: String,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session_id: SessionId,
    pub name: String,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl CreateSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: CreateSessionCommand,
    ) -> Result<CreateSessionResult, SessionError> {
        let session = Session::new(SessionId::new(), &cmd.name)?;
        let result = CreateSessionResult {
            session_id: *session.id(),
            name: session.name().to_string(),
        };

        self.store.insert(session).await;
        tracing::info!(session_id = %result.session_id, name = %result.name, "session created");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemorySessionStore;
    use crate::domain::foundation::SessionStatus;

    #[tokio::test]
    async fn creates_empty_session_awaiting_reveal() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = CreateSessionHandler::new(store.clone());

        let result = handler
            .handle(CreateSessionCommand {
                name: "Sprint 1".to_string(),
            })
            .await
            .unwrap();

        let shared = store.find_by_id(&result.session_id).await.unwrap();
        let session = shared.lock().await;
        assert_eq!(session.name(), "Sprint 1");
        assert_eq!(session.status(), SessionStatus::AwaitingReveal);
        assert!(session.participants().is_empty());
        assert!(session.last_result().is_none());
    }

    #[tokio::test]
    async fn each_session_gets_a_fresh_id() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = CreateSessionHandler::new(store.clone());

        let a = handler
            .handle(CreateSessionCommand { name: "a".into() })
            .await
            .unwrap();
        let b = handler
            .handle(CreateSessionCommand { name: "a".into() })
            .await
            .unwrap();

        assert_ne!(a.session_id, b.session_id);
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn fails_with_empty_name() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = CreateSessionHandler::new(store.clone());

        let result = handler
            .handle(CreateSessionCommand {
                name: "   ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(SessionError::ValidationFailed { .. })));
        assert_eq!(store.count().await, 0);
    }
}
