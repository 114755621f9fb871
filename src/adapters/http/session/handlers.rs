//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::session::{
    ConvertToAdminCommand, ConvertToAdminHandler, CreateSessionCommand, CreateSessionHandler,
    GetParticipantHandler, GetParticipantQuery, GetSessionHandler, GetSessionQuery,
    JoinSessionCommand, JoinSessionHandler, ResetGameCommand, ResetGameHandler,
    RevealCardsCommand, RevealCardsHandler, SelectCardCommand, SelectCardHandler,
    UpdateDisplayModeCommand, UpdateDisplayModeHandler, UpdateGameStatusCommand,
    UpdateGameStatusHandler,
};
use crate::domain::foundation::{ParticipantId, SessionId};
use crate::domain::session::SessionError;

use super::dto::{
    CreateSessionRequest, CreateSessionResponse, DisplayModeResponse, ErrorResponse,
    JoinSessionRequest, JoinSessionResponse, ParticipantResponse, RevealResponse,
    SelectCardRequest, SessionResponse, SessionViewQuery, UpdateStatusRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    pub create: Arc<CreateSessionHandler>,
    pub join: Arc<JoinSessionHandler>,
    pub get: Arc<GetSessionHandler>,
    pub get_participant: Arc<GetParticipantHandler>,
    pub select_card: Arc<SelectCardHandler>,
    pub reveal: Arc<RevealCardsHandler>,
    pub reset: Arc<ResetGameHandler>,
    pub update_display_mode: Arc<UpdateDisplayModeHandler>,
    pub convert_to_admin: Arc<ConvertToAdminHandler>,
    pub update_status: Arc<UpdateGameStatusHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Create a new session
pub async fn create_session(
    State(handlers): State<SessionHandlers>,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    let cmd = CreateSessionCommand { name: req.name };

    match handlers.create.handle(cmd).await {
        Ok(result) => {
            let response = CreateSessionResponse {
                session_id: result.session_id.to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/participants - Join a session
pub async fn join_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<JoinSessionRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = JoinSessionCommand {
        session_id,
        name: req.name,
        display_mode: req.display_mode,
    };

    match handlers.join.handle(cmd).await {
        Ok(result) => {
            let response = JoinSessionResponse {
                participant_id: result.participant_id.to_string(),
                role: result.role,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:id - Get session details
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Query(params): Query<SessionViewQuery>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let viewer = match params.participant_id.as_deref().map(parse_participant_id) {
        Some(Ok(id)) => Some(id),
        Some(Err(response)) => return response,
        None => None,
    };

    match handlers.get.handle(GetSessionQuery { session_id }).await {
        Ok(session) => {
            let response = SessionResponse::for_viewer(&session, viewer.as_ref());
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:id/participants/:pid - Get one participant
pub async fn get_participant(
    State(handlers): State<SessionHandlers>,
    Path((session_id, participant_id)): Path<(String, String)>,
    Query(params): Query<SessionViewQuery>,
) -> Response {
    let (session_id, participant_id) = match parse_ids(&session_id, &participant_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };
    let viewer = match params.participant_id.as_deref().map(parse_participant_id) {
        Some(Ok(id)) => Some(id),
        Some(Err(response)) => return response,
        None => None,
    };

    let query = GetParticipantQuery {
        session_id,
        participant_id,
        viewer,
    };

    match handlers.get_participant.handle(query).await {
        Ok(view) => {
            let response =
                ParticipantResponse::from_participant(&view.participant, view.card_visible);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// PUT /api/sessions/:id/participants/:pid/card - Pick a card
pub async fn select_card(
    State(handlers): State<SessionHandlers>,
    Path((session_id, participant_id)): Path<(String, String)>,
    Json(req): Json<SelectCardRequest>,
) -> Response {
    let (session_id, participant_id) = match parse_ids(&session_id, &participant_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = SelectCardCommand {
        session_id,
        participant_id,
        token: req.card_selected,
    };

    match handlers.select_card.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/participants/:pid/display-mode - Toggle player/spectator
pub async fn update_display_mode(
    State(handlers): State<SessionHandlers>,
    Path((session_id, participant_id)): Path<(String, String)>,
) -> Response {
    let (session_id, participant_id) = match parse_ids(&session_id, &participant_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = UpdateDisplayModeCommand {
        session_id,
        participant_id,
    };

    match handlers.update_display_mode.handle(cmd).await {
        Ok(display_mode) => {
            (StatusCode::OK, Json(DisplayModeResponse { display_mode })).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/participants/:pid/admin - Grant admin rights
pub async fn convert_to_admin(
    State(handlers): State<SessionHandlers>,
    Path((session_id, participant_id)): Path<(String, String)>,
) -> Response {
    let (session_id, participant_id) = match parse_ids(&session_id, &participant_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = ConvertToAdminCommand {
        session_id,
        participant_id,
    };

    match handlers.convert_to_admin.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/reveal - Reveal the cards
pub async fn reveal_cards(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.reveal.handle(RevealCardsCommand { session_id }).await {
        Ok(result) => {
            let response: RevealResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/reset - Start a new round
pub async fn reset_game(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.reset.handle(ResetGameCommand { session_id }).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// PUT /api/sessions/:id/status - Force the round status
pub async fn update_game_status(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateGameStatusCommand {
        session_id,
        status: req.status,
    };

    match handlers.update_status.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Path parsing
// ════════════════════════════════════════════════════════════════════════════

#[allow(clippy::result_large_err)]
fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

#[allow(clippy::result_large_err)]
fn parse_participant_id(raw: &str) -> Result<ParticipantId, Response> {
    raw.parse::<ParticipantId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid participant ID")),
        )
            .into_response()
    })
}

#[allow(clippy::result_large_err)]
fn parse_ids(session_id: &str, participant_id: &str) -> Result<(SessionId, ParticipantId), Response> {
    Ok((
        parse_session_id(session_id)?,
        parse_participant_id(participant_id)?,
    ))
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_session_error(error: SessionError) -> Response {
    let status = match &error {
        SessionError::NotFound(_) | SessionError::ParticipantNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        SessionError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorResponse::from(&error))).into_response()
}
