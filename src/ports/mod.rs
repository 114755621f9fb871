//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events
//!
//! ## Session Ports
//!
//! - `SessionStore` - Holds live sessions behind per-session locks
//! - `AutoResetScheduler` - Delayed return to `AwaitingReveal` after a reveal

mod auto_reset;
mod event_publisher;
mod event_subscriber;
mod session_store;

pub use auto_reset::AutoResetScheduler;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use session_store::{SessionStore, SharedSession};
