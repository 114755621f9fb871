//! Session domain events.
//!
//! Events published when a session changes in a way connected
//! participants need to see:
//! - `ParticipantJoined` - Someone joined the table
//! - `CardSelected` - Someone picked (or changed) a card; the value stays private
//! - `CardsRevealed` - The round was tallied
//! - `GameReset` - Cards and result were cleared for a new round
//! - `ParticipantUpdated` - Role or display mode changed
//! - `StatusChanged` - The round status was forced or auto-reset

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, EventId, ParticipantId, SessionId, SessionStatus, Timestamp,
};

use super::participant::{DisplayMode, ParticipantRole};
use super::score::ScoreCard;

/// Every event type emitted by the session module.
pub const SESSION_EVENT_TYPES: &[&str] = &[
    ParticipantJoined::EVENT_TYPE,
    CardSelected::EVENT_TYPE,
    CardsRevealed::EVENT_TYPE,
    GameReset::EVENT_TYPE,
    ParticipantUpdated::EVENT_TYPE,
    StatusChanged::EVENT_TYPE,
];

// ════════════════════════════════════════════════════════════════════════════
// ParticipantJoined
// ════════════════════════════════════════════════════════════════════════════

/// Published when a participant joins a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantJoined {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
    pub name: String,
    pub role: ParticipantRole,
    pub display_mode: DisplayMode,
    pub joined_at: Timestamp,
}

impl ParticipantJoined {
    pub const EVENT_TYPE: &'static str = "session.participant_joined";
}

domain_event!(
    ParticipantJoined,
    event_type = ParticipantJoined::EVENT_TYPE,
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = joined_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// CardSelected
// ════════════════════════════════════════════════════════════════════════════

/// Published when a participant picks a card. Carries no card value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSelected {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
    pub selected_at: Timestamp,
}

impl CardSelected {
    pub const EVENT_TYPE: &'static str = "session.card_selected";
}

domain_event!(
    CardSelected,
    event_type = CardSelected::EVENT_TYPE,
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = selected_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// CardsRevealed
// ════════════════════════════════════════════════════════════════════════════

/// Published when a round is revealed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardsRevealed {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub average: Option<f64>,
    pub score_cards: Vec<ScoreCard>,
    pub revealed_at: Timestamp,
}

impl CardsRevealed {
    pub const EVENT_TYPE: &'static str = "session.cards_revealed";
}

domain_event!(
    CardsRevealed,
    event_type = CardsRevealed::EVENT_TYPE,
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = revealed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// GameReset
// ════════════════════════════════════════════════════════════════════════════

/// Published when a session is reset for a new round.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReset {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub reset_at: Timestamp,
}

impl GameReset {
    pub const EVENT_TYPE: &'static str = "session.game_reset";
}

domain_event!(
    GameReset,
    event_type = GameReset::EVENT_TYPE,
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = reset_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ParticipantUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a participant's role or display mode changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantUpdated {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
    pub role: ParticipantRole,
    pub display_mode: DisplayMode,
    pub updated_at: Timestamp,
}

impl ParticipantUpdated {
    pub const EVENT_TYPE: &'static str = "session.participant_updated";
}

domain_event!(
    ParticipantUpdated,
    event_type = ParticipantUpdated::EVENT_TYPE,
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = updated_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// StatusChanged
// ════════════════════════════════════════════════════════════════════════════

/// Published when the round status is set directly or by the auto-reset timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChanged {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub status: SessionStatus,
    /// True when the change came from the auto-reset timer.
    pub automatic: bool,
    pub changed_at: Timestamp,
}

impl StatusChanged {
    pub const EVENT_TYPE: &'static str = "session.status_changed";
}

domain_event!(
    StatusChanged,
    event_type = StatusChanged::EVENT_TYPE,
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = changed_at,
    event_id = event_id
);
