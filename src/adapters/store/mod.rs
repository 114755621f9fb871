//! Session store adapters.
//!
//! - `InMemorySessionStore` - Process-local map of live sessions

mod in_memory;

pub use in_memory::InMemorySessionStore;
