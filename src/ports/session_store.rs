//! Session store port.
//!
//! Defines the contract for holding live sessions. Every session sits
//! behind its own async mutex so operations on one session serialize
//! while different sessions proceed in parallel.
//!
//! # Design
//!
//! - **In-memory**: Sessions live for the lifetime of the process
//! - **Per-session locking**: Callers lock the handle they get back
//! - **Infallible lookups**: A missing session is `None`, not an error

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;

/// Shared handle to one live session.
pub type SharedSession = Arc<Mutex<Session>>;

/// Store port for live sessions.
///
/// Implementations must ensure:
/// - Lookups and inserts on different sessions never block each other
///   for longer than a map access
/// - The same handle is returned for the same id until the session is removed
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Register a new session and return its shared handle.
    ///
    /// Ids are freshly generated, so an existing entry with the same id is
    /// replaced.
    async fn insert(&self, session: Session) -> SharedSession;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Option<SharedSession>;

    /// Number of live sessions.
    async fn count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SessionStore) {}
    }
}
