//! Session aggregate entity.
//!
//! A session is one estimation table: its participants, their current
//! cards, the round status and the result of the latest reveal.
//!
//! # Ownership
//!
//! Sessions own their participants outright. The store owns sessions and
//! hands out one lock per session, so every method here runs with
//! exclusive access.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ParticipantId, SessionId, SessionStatus, Timestamp, ValidationError,
};

use super::errors::SessionError;
use super::participant::{DisplayMode, Participant, ParticipantRole};
use super::score::RevealResult;

/// Maximum length for a session name.
pub const MAX_SESSION_NAME_LENGTH: usize = 100;

/// Session aggregate - one estimation table.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `name` is 1-100 characters, non-empty
/// - `participants` is in join order
/// - the first participant to join is an admin
/// - `last_result` is `None` after a reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    name: String,
    status: SessionStatus,
    participants: Vec<Participant>,
    last_result: Option<RevealResult>,
    created_at: Timestamp,
}

impl Session {
    /// Create a new session awaiting its first reveal.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if name is empty or too long
    pub fn new(id: SessionId, name: &str) -> Result<Self, SessionError> {
        let name = Self::validate_name(name)?;

        Ok(Self {
            id,
            name,
            status: SessionStatus::AwaitingReveal,
            participants: Vec::new(),
            last_result: None,
            created_at: Timestamp::now(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Participants in join order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn last_result(&self) -> Option<&RevealResult> {
        self.last_result.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn participant(&self, participant_id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id() == participant_id)
    }

    pub fn has_participant(&self, participant_id: &ParticipantId) -> bool {
        self.participant(participant_id).is_some()
    }

    /// Looks up a participant, failing with `ParticipantNotFound`.
    pub fn require_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<&Participant, SessionError> {
        self.participant(participant_id)
            .ok_or_else(|| SessionError::participant_not_found(self.id, *participant_id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a participant. The first one to join becomes the admin.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if name is empty or too long
    pub fn add_participant(
        &mut self,
        name: &str,
        display_mode: DisplayMode,
    ) -> Result<&Participant, SessionError> {
        let name = Participant::validate_name(name)?;
        let role = if self.participants.is_empty() {
            ParticipantRole::Admin
        } else {
            ParticipantRole::Player
        };

        self.participants
            .push(Participant::new(ParticipantId::new(), name, role, display_mode));
        Ok(&self.participants[self.participants.len() - 1])
    }

    /// Record a participant's card, replacing any previous pick.
    ///
    /// The token is stored verbatim; non-numeric tokens are legal.
    pub fn select_card(
        &mut self,
        participant_id: &ParticipantId,
        token: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.participant_mut(participant_id)?.select_card(token.into());
        Ok(())
    }

    /// Reveal the cards: tally the players' votes, keep the result and move
    /// to `ResettingSoon`. Spectators are never counted.
    pub fn reveal(&mut self) -> RevealResult {
        self.status = SessionStatus::Revealing;

        let result = RevealResult::from_votes(
            self.participants
                .iter()
                .filter_map(Participant::counted_vote),
        );
        self.last_result = Some(result.clone());

        self.status = SessionStatus::ResettingSoon;
        result
    }

    /// Start a fresh round: clear every card and the last result.
    pub fn reset(&mut self) {
        for participant in &mut self.participants {
            participant.clear_card();
        }
        self.last_result = None;
        self.status = SessionStatus::AwaitingReveal;
    }

    /// Flip a participant between player and spectator.
    ///
    /// Returns the new mode.
    pub fn toggle_display_mode(
        &mut self,
        participant_id: &ParticipantId,
    ) -> Result<DisplayMode, SessionError> {
        Ok(self.participant_mut(participant_id)?.toggle_display_mode())
    }

    /// Grant admin rights. Never revokes.
    pub fn promote_to_admin(&mut self, participant_id: &ParticipantId) -> Result<(), SessionError> {
        self.participant_mut(participant_id)?.grant_admin();
        Ok(())
    }

    /// Force the round status.
    pub fn set_status(&mut self, status: SessionStatus) {
        self.status = status;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn participant_mut(
        &mut self,
        participant_id: &ParticipantId,
    ) -> Result<&mut Participant, SessionError> {
        let session_id = self.id;
        self.participants
            .iter_mut()
            .find(|p| &p.id() == participant_id)
            .ok_or_else(|| SessionError::participant_not_found(session_id, *participant_id))
    }

    fn validate_name(name: &str) -> Result<String, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let length = trimmed.chars().count();
        if length > MAX_SESSION_NAME_LENGTH {
            return Err(ValidationError::too_long(
                "name",
                MAX_SESSION_NAME_LENGTH,
                length,
            ));
        }
        Ok(trimmed.to_string())
    }
}
