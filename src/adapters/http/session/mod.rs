//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateSessionRequest, CreateSessionResponse, DisplayModeResponse, ErrorResponse,
    JoinSessionRequest, JoinSessionResponse, ParticipantResponse, RevealResponse,
    ScoreCardResponse, SelectCardRequest, SessionResponse, SessionViewQuery, UpdateStatusRequest,
};
pub use handlers::SessionHandlers;
pub use routes::session_routes;
