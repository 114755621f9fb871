//! Tokio-backed auto-reset timer.
//!
//! Each armed session gets a sleeping task. Re-arming aborts the previous
//! task and bumps a generation counter; a task only acts if its generation
//! is still the one on record once it holds the session lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::foundation::{EventEnvelope, EventId, SessionId, SessionStatus, Timestamp};
use crate::domain::session::StatusChanged;
use crate::ports::{AutoResetScheduler, EventPublisher, SessionStore};

type PendingTimers = Arc<Mutex<HashMap<SessionId, (u64, JoinHandle<()>)>>>;

/// Auto-reset scheduler running on the tokio runtime.
pub struct TokioAutoResetScheduler {
    store: Arc<dyn SessionStore>,
    publisher: Arc<dyn EventPublisher>,
    delay: Duration,
    pending: PendingTimers,
    generation: AtomicU64,
}

impl TokioAutoResetScheduler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        publisher: Arc<dyn EventPublisher>,
        delay: Duration,
    ) -> Self {
        Self {
            store,
            publisher,
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Number of timers armed and not yet fired.
    pub fn pending_count(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_pending(&self, session_id: &SessionId) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(session_id)
    }
}

fn is_current(pending: &PendingTimers, session_id: &SessionId, generation: u64) -> bool {
    pending
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(session_id)
        .is_some_and(|(current, _)| *current == generation)
}

fn forget(pending: &PendingTimers, session_id: &SessionId, generation: u64) {
    let mut pending = pending.lock().unwrap_or_else(PoisonError::into_inner);
    if pending
        .get(session_id)
        .is_some_and(|(current, _)| *current == generation)
    {
        pending.remove(session_id);
    }
}

async fn fire(
    store: Arc<dyn SessionStore>,
    publisher: Arc<dyn EventPublisher>,
    pending: PendingTimers,
    session_id: SessionId,
    generation: u64,
) {
    let Some(shared) = store.find_by_id(&session_id).await else {
        tracing::debug!(%session_id, "auto-reset fired for unknown session");
        forget(&pending, &session_id, generation);
        return;
    };

    {
        let mut session = shared.lock().await;
        if !is_current(&pending, &session_id, generation) {
            return;
        }
        session.set_status(SessionStatus::AwaitingReveal);
        forget(&pending, &session_id, generation);
    }

    tracing::debug!(%session_id, "auto-reset to awaiting reveal");

    let event = StatusChanged {
        event_id: EventId::new(),
        session_id,
        status: SessionStatus::AwaitingReveal,
        automatic: true,
        changed_at: Timestamp::now(),
    };
    let published = match EventEnvelope::from_event(&event) {
        Ok(envelope) => publisher.publish(envelope).await.map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    if let Err(error) = published {
        tracing::warn!(%session_id, %error, "failed to publish auto-reset");
    }
}

impl AutoResetScheduler for TokioAutoResetScheduler {
    fn schedule(&self, session_id: SessionId) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self.delay;
        let store = Arc::clone(&self.store);
        let publisher = Arc::clone(&self.publisher);
        let pending = Arc::clone(&self.pending);

        // Hold the map lock across spawn so the task cannot look itself up
        // before it is registered.
        let mut timers = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire(store, publisher, pending, session_id, generation).await;
        });
        if let Some((_, previous)) = timers.insert(session_id, (generation, handle)) {
            previous.abort();
        }
    }

    fn cancel(&self, session_id: &SessionId) {
        let removed = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id);
        if let Some((_, handle)) = removed {
            handle.abort();
        }
    }
}

impl Drop for TokioAutoResetScheduler {
    fn drop(&mut self) {
        let timers = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        for (_, handle) in timers.values() {
            handle.abort();
        }
    }
}
