//! Session-specific error types.

use crate::domain::foundation::{ErrorCode, ParticipantId, SessionId, ValidationError};

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// Session exists but the participant does not.
    ParticipantNotFound {
        session_id: SessionId,
        participant_id: ParticipantId,
    },
    /// Validation failed.
    ValidationFailed { field: String, message: String },
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }
    pub fn participant_not_found(session_id: SessionId, participant_id: ParticipantId) -> Self {
        SessionError::ParticipantNotFound {
            session_id,
            participant_id,
        }
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::ParticipantNotFound { .. } => ErrorCode::ParticipantNotFound,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::ParticipantNotFound {
                session_id,
                participant_id,
            } => format!(
                "Participant {} not found in session {}",
                participant_id, session_id
            ),
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
