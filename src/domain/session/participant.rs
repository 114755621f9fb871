//! Participant entity and its role/display enums.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ParticipantId, Timestamp, ValidationError};

/// Maximum length for a participant's display name.
pub const MAX_PARTICIPANT_NAME_LENGTH: usize = 50;

/// Permission level of a participant within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    Admin,
    Player,
}

/// Whether a participant votes or only watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Player,
    Spectator,
}

impl DisplayMode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Player => DisplayMode::Spectator,
            DisplayMode::Spectator => DisplayMode::Player,
        }
    }

    /// Returns true if cards in this mode count toward the tally.
    pub fn counts_votes(self) -> bool {
        matches!(self, DisplayMode::Player)
    }
}

/// One member of a session.
///
/// Owned exclusively by its [`Session`](super::Session); only the
/// aggregate mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    role: ParticipantRole,
    display_mode: DisplayMode,
    card_selected: Option<String>,
    active: bool,
    joined_at: Timestamp,
}

impl Participant {
    pub(crate) fn new(
        id: ParticipantId,
        name: String,
        role: ParticipantRole,
        display_mode: DisplayMode,
    ) -> Self {
        Self {
            id,
            name,
            role,
            display_mode,
            card_selected: None,
            active: true,
            joined_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> ParticipantRole {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == ParticipantRole::Admin
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn card_selected(&self) -> Option<&str> {
        self.card_selected.as_deref()
    }

    pub fn has_selected(&self) -> bool {
        self.card_selected.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn joined_at(&self) -> &Timestamp {
        &self.joined_at
    }

    /// The card this participant contributes to a tally, if any.
    pub(crate) fn counted_vote(&self) -> Option<&str> {
        if self.display_mode.counts_votes() {
            self.card_selected()
        } else {
            None
        }
    }

    pub(crate) fn select_card(&mut self, token: String) {
        self.card_selected = Some(token);
    }

    pub(crate) fn clear_card(&mut self) {
        self.card_selected = None;
    }

    pub(crate) fn grant_admin(&mut self) {
        self.role = ParticipantRole::Admin;
    }

    /// Flips the display mode. Becoming a spectator drops the pending card.
    pub(crate) fn toggle_display_mode(&mut self) -> DisplayMode {
        self.display_mode = self.display_mode.toggled();
        if !self.display_mode.counts_votes() {
            self.card_selected = None;
        }
        self.display_mode
    }

    /// Trims and validates a display name.
    pub(crate) fn validate_name(name: &str) -> Result<String, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let length = trimmed.chars().count();
        if length > MAX_PARTICIPANT_NAME_LENGTH {
            return Err(ValidationError::too_long(
                "name",
                MAX_PARTICIPANT_NAME_LENGTH,
                length,
            ));
        }
        Ok(trimmed.to_string())
    }
}
