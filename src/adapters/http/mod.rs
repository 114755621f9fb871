//! HTTP adapters - REST API implementations.
//!
//! `session` exposes the estimation endpoints; this module adds the health
//! check and assembles the full router with its middleware stack.

pub mod session;

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use http::HeaderValue;
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapters::scheduler::TokioAutoResetScheduler;
use crate::adapters::websocket::{live_routes, RoomManager, WebSocketState};
use crate::config::ServerConfig;
use crate::ports::SessionStore;

pub use session::{session_routes, SessionHandlers};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
    pub rooms: usize,
    pub connections: usize,
    pub pending_resets: usize,
}

/// What the health check reports on.
#[derive(Clone)]
pub struct HealthState {
    pub store: Arc<dyn SessionStore>,
    pub rooms: Arc<RoomManager>,
    pub scheduler: Arc<TokioAutoResetScheduler>,
}

/// GET /health
async fn health(State(state): State<HealthState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        sessions: state.store.count().await,
        rooms: state.rooms.active_rooms().await.len(),
        connections: state.rooms.total_client_count().await,
        pending_resets: state.scheduler.pending_count(),
    })
}

pub fn health_routes(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state)
}

/// Builds the public router: REST and live endpoints under `/api/sessions`
/// plus `/health`, wrapped in tracing, CORS and request timeout layers.
pub fn api_router(
    handlers: SessionHandlers,
    live: WebSocketState,
    health: HealthState,
    server: &ServerConfig,
) -> Router {
    Router::new()
        .nest(
            "/api/sessions",
            session_routes(handlers).merge(live_routes(live)),
        )
        .merge(health_routes(health))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

/// Any origin when none are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}
