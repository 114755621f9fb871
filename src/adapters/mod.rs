//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - In-process event bus
//! - `store` - In-memory session registry
//! - `scheduler` - Tokio-backed auto-reset timers
//! - `http` - REST endpoints and router assembly
//! - `websocket` - Live session updates

pub mod events;
pub mod http;
pub mod scheduler;
pub mod store;
pub mod websocket;

pub use events::InMemoryEventBus;
pub use scheduler::TokioAutoResetScheduler;
pub use store::InMemorySessionStore;
