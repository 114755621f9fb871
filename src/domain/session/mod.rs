//! Session domain module.
//!
//! Handles the estimation table: who is seated, what they picked, and the
//! round status that cycles from voting to reveal and back.
//!
//! # Events
//!
//! - `ParticipantJoined` - Published when someone joins
//! - `CardSelected` - Published when someone picks a card
//! - `CardsRevealed` - Published when a round is tallied
//! - `GameReset` - Published when a new round starts
//! - `ParticipantUpdated` - Published when a role or display mode changes
//! - `StatusChanged` - Published when the status is forced or auto-reset

mod aggregate;
mod errors;
mod events;
mod participant;
mod score;

pub use aggregate::{Session, MAX_SESSION_NAME_LENGTH};
pub use errors::SessionError;
pub use events::{
    CardSelected, CardsRevealed, GameReset, ParticipantJoined, ParticipantUpdated,
    StatusChanged, SESSION_EVENT_TYPES,
};
pub use participant::{DisplayMode, Participant, ParticipantRole, MAX_PARTICIPANT_NAME_LENGTH};
pub use score::{average, numeric_value, tally, RevealResult, ScoreCard};
