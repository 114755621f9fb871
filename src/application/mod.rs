//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands mutate a session; queries return snapshots.

pub mod handlers;

pub use handlers::session::{
    CheckMembershipHandler, ConvertToAdminCommand, ConvertToAdminHandler, CreateSessionCommand,
    CreateSessionHandler, CreateSessionResult, GetParticipantHandler, GetParticipantQuery,
    GetSessionHandler, GetSessionQuery, IsParticipantQuery, JoinSessionCommand,
    JoinSessionHandler, JoinSessionResult, ParticipantView, ResetGameCommand, ResetGameHandler,
    RevealCardsCommand, RevealCardsHandler, SelectCardCommand, SelectCardHandler,
    UpdateDisplayModeCommand, UpdateDisplayModeHandler, UpdateGameStatusCommand,
    UpdateGameStatusHandler,
};
