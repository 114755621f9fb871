//! EventSubscriber port - Interface for subscribing to domain events.
//!
//! This port defines how transport adapters register interest in domain
//! events without knowing about the bus implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// Implementations should be:
/// - **Quick** - the publisher awaits every handler
/// - **Isolated** - errors don't affect other handlers
///
/// # Example
///
/// ```ignore
/// struct RoomBroadcaster { /* ... */ }
///
/// #[async_trait]
/// impl EventHandler for RoomBroadcaster {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         // Broadcast event.payload to the room named by event.aggregate_id...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "RoomBroadcaster"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to domain events.
///
/// Handlers register interest in specific event types and are invoked
/// when matching events are published.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe handler to multiple event types.
    ///
    /// The same handler instance is invoked for any matching event type.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

/// Combined trait for event bus implementations.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_handler_object_safe(_: &dyn EventHandler) {}

    #[allow(dead_code)]
    fn assert_subscriber_object_safe(_: &dyn EventSubscriber) {}

    #[allow(dead_code)]
    fn assert_bus_object_safe(_: &dyn EventBus) {}

    #[test]
    fn event_ports_are_object_safe() {
        fn _accepts_handler(_handler: Arc<dyn EventHandler>) {}
        fn _accepts_subscriber(_subscriber: Arc<dyn EventSubscriber>) {}
    }
}
