//! Shared mocks for session handler tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::adapters::store::InMemorySessionStore;
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope, ParticipantId, SessionId};
use crate::domain::session::{DisplayMode, Session};
use crate::ports::{AutoResetScheduler, EventPublisher, SessionStore};

pub(crate) struct MockEventPublisher {
    published_events: Mutex<Vec<EventEnvelope>>,
    fail_publish: bool,
}

impl MockEventPublisher {
    pub(crate) fn new() -> Self {
        Self {
            published_events: Mutex::new(Vec::new()),
            fail_publish: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            published_events: Mutex::new(Vec::new()),
            fail_publish: true,
        }
    }

    pub(crate) fn published_events(&self) -> Vec<EventEnvelope> {
        self.published_events.lock().unwrap().clone()
    }

    pub(crate) fn event_types(&self) -> Vec<String> {
        self.published_events()
            .into_iter()
            .map(|e| e.event_type)
            .collect()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.fail_publish {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Simulated publish failure",
            ));
        }
        self.published_events.lock().unwrap().push(event);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TimerCall {
    Schedule(SessionId),
    Cancel(SessionId),
}

#[derive(Default)]
pub(crate) struct RecordingScheduler {
    calls: Mutex<Vec<TimerCall>>,
}

impl RecordingScheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<TimerCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl AutoResetScheduler for RecordingScheduler {
    fn schedule(&self, session_id: SessionId) {
        self.calls.lock().unwrap().push(TimerCall::Schedule(session_id));
    }

    fn cancel(&self, session_id: &SessionId) {
        self.calls.lock().unwrap().push(TimerCall::Cancel(*session_id));
    }
}

/// Store holding one session named "Sprint 1" with the given players.
pub(crate) async fn seeded_store(
    players: &[&str],
) -> (Arc<InMemorySessionStore>, SessionId, Vec<ParticipantId>) {
    let store = Arc::new(InMemorySessionStore::new());
    let mut session = Session::new(SessionId::new(), "Sprint 1").unwrap();
    let ids = players
        .iter()
        .map(|name| session.add_participant(name, DisplayMode::Player).unwrap().id())
        .collect();
    let session_id = *session.id();
    store.insert(session).await;
    (store, session_id, ids)
}

pub(crate) async fn snapshot(store: &InMemorySessionStore, id: &SessionId) -> Session {
    store.find_by_id(id).await.unwrap().lock().await.clone()
}
