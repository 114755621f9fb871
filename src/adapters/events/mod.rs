//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus feeding the WebSocket bridge

mod in_memory;

pub use in_memory::InMemoryEventBus;
