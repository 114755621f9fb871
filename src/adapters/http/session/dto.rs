//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ParticipantId, SessionStatus};
use crate::domain::session::{
    DisplayMode, Participant, ParticipantRole, RevealResult, ScoreCard, Session, SessionError,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
}

/// Request to join a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSessionRequest {
    pub name: String,
    #[serde(default)]
    pub display_mode: Option<DisplayMode>,
}

/// Request to pick a card.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectCardRequest {
    pub card_selected: String,
}

/// Request to force the round status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: SessionStatus,
}

/// Query parameters for reading a session.
///
/// `participantId` names the viewer, whose own card stays visible while
/// the others are masked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionViewQuery {
    #[serde(default)]
    pub participant_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSessionResponse {
    pub participant_id: String,
    pub role: ParticipantRole,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayModeResponse {
    pub display_mode: DisplayMode,
}

/// Participant as seen by API clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub id: String,
    pub name: String,
    pub role: ParticipantRole,
    pub display_mode: DisplayMode,
    pub active: bool,
    pub has_selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_selected: Option<String>,
    pub joined_at: String,
}

impl ParticipantResponse {
    /// Build a view, showing the card only when `reveal_card` is set.
    pub fn from_participant(participant: &Participant, reveal_card: bool) -> Self {
        Self {
            id: participant.id().to_string(),
            name: participant.name().to_string(),
            role: participant.role(),
            display_mode: participant.display_mode(),
            active: participant.is_active(),
            has_selected: participant.has_selected(),
            card_selected: participant
                .card_selected()
                .filter(|_| reveal_card)
                .map(str::to_string),
            joined_at: participant.joined_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreCardResponse {
    pub token: String,
    pub count: u32,
}

impl From<ScoreCard> for ScoreCardResponse {
    fn from(card: ScoreCard) -> Self {
        Self {
            token: card.token,
            count: card.count,
        }
    }
}

/// Outcome of a reveal. `average` is `null` when no numeric card was played.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealResponse {
    pub average: Option<f64>,
    pub score_cards: Vec<ScoreCardResponse>,
}

impl From<RevealResult> for RevealResponse {
    fn from(result: RevealResult) -> Self {
        Self {
            average: result.average,
            score_cards: result.score_cards.into_iter().map(Into::into).collect(),
        }
    }
}

/// Detailed session view for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub name: String,
    pub status: SessionStatus,
    pub participants: Vec<ParticipantResponse>,
    pub last_result: Option<RevealResponse>,
    pub created_at: String,
}

impl SessionResponse {
    /// Build a view for `viewer`. While votes are being cast, every card
    /// but the viewer's own is masked.
    pub fn for_viewer(session: &Session, viewer: Option<&ParticipantId>) -> Self {
        let hide = session.status().hides_cards();
        Self {
            id: session.id().to_string(),
            name: session.name().to_string(),
            status: session.status(),
            participants: session
                .participants()
                .iter()
                .map(|p| {
                    let own = viewer.is_some_and(|v| *v == p.id());
                    ParticipantResponse::from_participant(p, !hide || own)
                })
                .collect(),
            last_result: session.last_result().cloned().map(Into::into),
            created_at: session.created_at().to_rfc3339(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<&SessionError> for ErrorResponse {
    fn from(error: &SessionError) -> Self {
        let details = match error {
            SessionError::ValidationFailed { field, .. } => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        };
        Self {
            code: error.code().to_string(),
            message: error.message(),
            details,
        }
    }
}
