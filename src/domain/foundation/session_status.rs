//! SessionStatus enum for tracking the voting round of a session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a session is within its voting round.
///
/// The round cycles for the lifetime of the session:
/// `AwaitingReveal -> Revealing -> ResettingSoon -> AwaitingReveal`.
/// No status is terminal and any status may be forced directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Participants are picking cards.
    #[default]
    AwaitingReveal,
    /// Cards are being revealed and tallied.
    Revealing,
    /// Results are on display; the round resets automatically after a delay.
    ResettingSoon,
}

impl SessionStatus {
    /// Returns true if entering this status by direct request arms the
    /// automatic return to `AwaitingReveal`.
    pub fn arms_auto_reset(&self) -> bool {
        matches!(self, SessionStatus::Revealing)
    }

    /// Returns true while card values are still hidden from other participants.
    pub fn hides_cards(&self) -> bool {
        matches!(self, SessionStatus::AwaitingReveal)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::AwaitingReveal => "AwaitingReveal",
            SessionStatus::Revealing => "Revealing",
            SessionStatus::ResettingSoon => "ResettingSoon",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_awaiting_reveal() {
        assert_eq!(SessionStatus::default(), SessionStatus::AwaitingReveal);
    }

    #[test]
    fn only_revealing_arms_auto_reset() {
        assert!(SessionStatus::Revealing.arms_auto_reset());
        assert!(!SessionStatus::AwaitingReveal.arms_auto_reset());
        assert!(!SessionStatus::ResettingSoon.arms_auto_reset());
    }

    #[test]
    fn cards_hidden_only_while_awaiting_reveal() {
        assert!(SessionStatus::AwaitingReveal.hides_cards());
        assert!(!SessionStatus::Revealing.hides_cards());
        assert!(!SessionStatus::ResettingSoon.hides_cards());
    }

    #[test]
    fn display_works_correctly() {
        assert_eq!(format!("{}", SessionStatus::ResettingSoon), "ResettingSoon");
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::AwaitingReveal).unwrap(),
            "\"awaiting_reveal\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::ResettingSoon).unwrap(),
            "\"resetting_soon\""
        );
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let status: SessionStatus = serde_json::from_str("\"revealing\"").unwrap();
        assert_eq!(status, SessionStatus::Revealing);
    }
}
