//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    convert_to_admin, create_session, get_participant, get_session, join_session,
    reset_game, reveal_cards, select_card, update_display_mode, update_game_status,
    SessionHandlers,
};

/// Creates the session router with all endpoints.
///
/// Mount under `/api/sessions`.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", post(create_session))
        .route("/:id", get(get_session))
        .route("/:id/participants", post(join_session))
        .route("/:id/participants/:pid", get(get_participant))
        .route("/:id/participants/:pid/card", put(select_card))
        .route("/:id/participants/:pid/display-mode", post(update_display_mode))
        .route("/:id/participants/:pid/admin", post(convert_to_admin))
        .route("/:id/reveal", post(reveal_cards))
        .route("/:id/reset", post(reset_game))
        .route("/:id/status", put(update_game_status))
        .with_state(handlers)
}
