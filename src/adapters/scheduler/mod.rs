//! Auto-reset scheduler adapters.
//!
//! - `TokioAutoResetScheduler` - One tokio task per armed session

mod tokio_auto_reset;

pub use tokio_auto_reset::TokioAutoResetScheduler;
