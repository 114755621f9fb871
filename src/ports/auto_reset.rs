//! Auto-reset scheduler port.
//!
//! After a reveal the table shows the result for a short while and then
//! drops back to `AwaitingReveal` on its own. This port owns that delay.

use crate::domain::foundation::SessionId;

/// Port for arming and disarming the per-session auto-reset timer.
///
/// Implementations must ensure:
/// - At most one timer is pending per session; `schedule` replaces any
///   earlier one
/// - A cancelled timer never fires
/// - A fired timer sets the status to `AwaitingReveal` without touching
///   cards or the last result
///
/// Because firing only changes the status, cards from the previous round
/// stay selected and are tallied again on the next reveal unless a
/// `ResetGame` clears them first.
///
/// Callers invoke both methods while holding the session lock, so the
/// timer state always matches the latest status change.
pub trait AutoResetScheduler: Send + Sync {
    /// Arm (or re-arm) the timer for a session.
    fn schedule(&self, session_id: SessionId);

    /// Disarm the timer for a session. No-op when nothing is pending.
    fn cancel(&self, session_id: &SessionId);
}
