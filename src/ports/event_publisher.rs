//! EventPublisher port - Interface for publishing domain events.
//!
//! This port defines how the engine announces state changes without
//! knowing about the transport that fans them out to connected clients.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - `publish` does not wait on delivery to remote clients
/// - Errors are reported to the caller, who decides whether they matter
///
/// Session handlers treat publishing as best effort: a failed publish is
/// logged and never undoes the state change that produced the event.
///
/// # Example
///
/// ```ignore
/// let envelope = EventEnvelope::from_event(&joined)?;
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventPublisher) {}

    #[test]
    fn event_publisher_is_object_safe() {
        fn _accepts_dyn(_publisher: &dyn EventPublisher) {}
    }
}
