//! Integration tests for the session HTTP API.
//!
//! These tests drive the fully wired router the binary serves:
//! 1. Sessions are created and joined over REST
//! 2. Cards stay hidden until the reveal
//! 3. A reveal arms the auto-reset timer, which a forced status cancels
//! 4. Errors map to the documented status codes

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use pointing_poker::adapters::InMemoryEventBus;
use pointing_poker::app::App;
use pointing_poker::config::AppConfig;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn test_app() -> App {
    App::with_event_bus(
        &AppConfig::default(),
        Arc::new(InMemoryEventBus::recording()),
    )
}

async fn send(app: &App, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_session(app: &App, name: &str) -> String {
    let (status, body) = send(app, "POST", "/api/sessions", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["sessionId"].as_str().unwrap().to_string()
}

async fn join(app: &App, session_id: &str, name: &str) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        &format!("/api/sessions/{}/participants", session_id),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (
        body["participantId"].as_str().unwrap().to_string(),
        body["role"].as_str().unwrap().to_string(),
    )
}

async fn pick(app: &App, session_id: &str, participant_id: &str, token: &str) {
    let (status, _) = send(
        app,
        "PUT",
        &format!(
            "/api/sessions/{}/participants/{}/card",
            session_id, participant_id
        ),
        Some(json!({ "cardSelected": token })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

async fn status_of(app: &App, session_id: &str) -> String {
    let (_, body) = send(app, "GET", &format!("/api/sessions/{}", session_id), None).await;
    body["status"].as_str().unwrap().to_string()
}

// =============================================================================
// Round lifecycle
// =============================================================================

#[tokio::test]
async fn first_joiner_is_admin_and_later_joiners_are_players() {
    let app = test_app();
    let session_id = create_session(&app, "Sprint 42").await;

    let (_, alice_role) = join(&app, &session_id, "alice").await;
    let (_, bob_role) = join(&app, &session_id, "bob").await;

    assert_eq!(alice_role, "admin");
    assert_eq!(bob_role, "player");

    let (status, body) = send(&app, "GET", &format!("/api/sessions/{}", session_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sprint 42");
    assert_eq!(body["status"], "awaiting_reveal");
    assert_eq!(body["participants"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn cards_are_hidden_until_reveal() {
    let app = test_app();
    let session_id = create_session(&app, "Sprint").await;
    let (alice, _) = join(&app, &session_id, "alice").await;
    let (bob, _) = join(&app, &session_id, "bob").await;

    pick(&app, &session_id, &alice, "3").await;
    pick(&app, &session_id, &bob, "5").await;

    let (_, anonymous) = send(&app, "GET", &format!("/api/sessions/{}", session_id), None).await;
    for participant in anonymous["participants"].as_array().unwrap() {
        assert_eq!(participant["hasSelected"], true);
        assert!(participant.get("cardSelected").is_none());
    }

    let (_, as_alice) = send(
        &app,
        "GET",
        &format!("/api/sessions/{}?participantId={}", session_id, alice),
        None,
    )
    .await;
    let participants = as_alice["participants"].as_array().unwrap();
    let own = participants.iter().find(|p| p["id"] == alice.as_str()).unwrap();
    let other = participants.iter().find(|p| p["id"] == bob.as_str()).unwrap();
    assert_eq!(own["cardSelected"], "3");
    assert!(other.get("cardSelected").is_none());
}

#[tokio::test]
async fn reveal_tallies_players_and_reset_starts_a_new_round() {
    let app = test_app();
    let session_id = create_session(&app, "Sprint").await;
    let (alice, _) = join(&app, &session_id, "alice").await;
    let (bob, _) = join(&app, &session_id, "bob").await;
    let (carol, _) = join(&app, &session_id, "carol").await;

    pick(&app, &session_id, &alice, "3").await;
    pick(&app, &session_id, &bob, "5").await;
    pick(&app, &session_id, &carol, "?").await;

    // Carol moves to the spectator seat; their card no longer counts.
    let (status, body) = send(
        &app,
        "POST",
        &format!(
            "/api/sessions/{}/participants/{}/display-mode",
            session_id, carol
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["displayMode"], "spectator");

    let (status, result) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/reveal", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["average"], 4.0);
    assert_eq!(
        result["scoreCards"],
        json!([{ "token": "3", "count": 1 }, { "token": "5", "count": 1 }])
    );

    let (_, session) = send(&app, "GET", &format!("/api/sessions/{}", session_id), None).await;
    assert_eq!(session["status"], "resetting_soon");
    assert_eq!(session["lastResult"]["average"], 4.0);
    let alice_view = session["participants"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == alice.as_str())
        .unwrap()
        .clone();
    assert_eq!(alice_view["cardSelected"], "3");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/reset", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, session) = send(&app, "GET", &format!("/api/sessions/{}", session_id), None).await;
    assert_eq!(session["status"], "awaiting_reveal");
    assert!(session["lastResult"].is_null());
    for participant in session["participants"].as_array().unwrap() {
        assert_eq!(participant["hasSelected"], false);
    }
    assert!(!app.scheduler.is_pending(&session_id.parse().unwrap()));
}

#[tokio::test]
async fn reveal_with_only_non_numeric_cards_has_no_average() {
    let app = test_app();
    let session_id = create_session(&app, "Sprint").await;
    let (alice, _) = join(&app, &session_id, "alice").await;
    pick(&app, &session_id, &alice, "coffee").await;

    let (_, result) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/reveal", session_id),
        None,
    )
    .await;

    assert!(result["average"].is_null());
    assert_eq!(result["scoreCards"], json!([{ "token": "coffee", "count": 1 }]));
}

#[tokio::test]
async fn promoted_participant_becomes_admin() {
    let app = test_app();
    let session_id = create_session(&app, "Sprint").await;
    join(&app, &session_id, "alice").await;
    let (bob, _) = join(&app, &session_id, "bob").await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/participants/{}/admin", session_id, bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, participant) = send(
        &app,
        "GET",
        &format!("/api/sessions/{}/participants/{}", session_id, bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(participant["role"], "admin");
    assert!(app.events.has_event("session.participant_updated"));
}

#[tokio::test]
async fn participant_lookup_hides_card_from_others_until_reveal() {
    let app = test_app();
    let session_id = create_session(&app, "Sprint").await;
    let (alice, _) = join(&app, &session_id, "alice").await;
    let (bob, _) = join(&app, &session_id, "bob").await;
    pick(&app, &session_id, &alice, "13").await;

    let (status, seen_by_bob) = send(
        &app,
        "GET",
        &format!(
            "/api/sessions/{}/participants/{}?participantId={}",
            session_id, alice, bob
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seen_by_bob["hasSelected"], true);
    assert!(seen_by_bob.get("cardSelected").is_none());

    let (_, seen_by_alice) = send(
        &app,
        "GET",
        &format!(
            "/api/sessions/{}/participants/{}?participantId={}",
            session_id, alice, alice
        ),
        None,
    )
    .await;
    assert_eq!(seen_by_alice["cardSelected"], "13");

    send(
        &app,
        "POST",
        &format!("/api/sessions/{}/reveal", session_id),
        None,
    )
    .await;

    let (_, anonymous) = send(
        &app,
        "GET",
        &format!("/api/sessions/{}/participants/{}", session_id, alice),
        None,
    )
    .await;
    assert_eq!(anonymous["cardSelected"], "13");
}

// =============================================================================
// Auto-reset
// =============================================================================

#[tokio::test(start_paused = true)]
async fn reveal_returns_to_voting_after_the_configured_delay() {
    let app = test_app();
    let session_id = create_session(&app, "Sprint").await;
    let (alice, _) = join(&app, &session_id, "alice").await;
    pick(&app, &session_id, &alice, "8").await;

    send(
        &app,
        "POST",
        &format!("/api/sessions/{}/reveal", session_id),
        None,
    )
    .await;
    assert_eq!(status_of(&app, &session_id).await, "resetting_soon");

    tokio::time::sleep(Duration::from_secs(4)).await;

    let (_, session) = send(&app, "GET", &format!("/api/sessions/{}", session_id), None).await;
    assert_eq!(session["status"], "awaiting_reveal");
    // The timer only moves the status; cards and result stay until a reset.
    assert_eq!(session["lastResult"]["average"], 8.0);

    let automatic: Vec<_> = app
        .events
        .events_of_type("session.status_changed")
        .into_iter()
        .filter(|e| e.payload["automatic"] == true)
        .collect();
    assert_eq!(automatic.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn forcing_a_status_cancels_the_pending_reset() {
    let app = test_app();
    let session_id = create_session(&app, "Sprint").await;
    join(&app, &session_id, "alice").await;

    send(
        &app,
        "POST",
        &format!("/api/sessions/{}/reveal", session_id),
        None,
    )
    .await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/sessions/{}/status", session_id),
        Some(json!({ "status": "resetting_soon" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(status_of(&app, &session_id).await, "resetting_soon");
}

#[tokio::test(start_paused = true)]
async fn forcing_revealing_arms_the_timer() {
    let app = test_app();
    let session_id = create_session(&app, "Sprint").await;

    send(
        &app,
        "PUT",
        &format!("/api/sessions/{}/status", session_id),
        Some(json!({ "status": "revealing" })),
    )
    .await;
    assert_eq!(status_of(&app, &session_id).await, "revealing");

    tokio::time::sleep(Duration::from_secs(4)).await;

    assert_eq!(status_of(&app, &session_id).await, "awaiting_reveal");
}

// =============================================================================
// Errors and health
// =============================================================================

#[tokio::test]
async fn unknown_session_is_404() {
    let app = test_app();
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(&app, "GET", &format!("/api/sessions/{}", missing), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn unknown_participant_is_404() {
    let app = test_app();
    let session_id = create_session(&app, "Sprint").await;
    let stranger = uuid::Uuid::new_v4();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/sessions/{}/participants/{}/card", session_id, stranger),
        Some(json!({ "cardSelected": "5" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PARTICIPANT_NOT_FOUND");
}

#[tokio::test]
async fn malformed_ids_and_blank_names_are_400() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/api/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = send(&app, "POST", "/api/sessions", Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test(start_paused = true)]
async fn health_counts_live_sessions_and_armed_timers() {
    let app = test_app();
    let revealed = create_session(&app, "One").await;
    create_session(&app, "Two").await;
    send(
        &app,
        "POST",
        &format!("/api/sessions/{}/reveal", revealed),
        None,
    )
    .await;

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "ok",
            "sessions": 2,
            "rooms": 0,
            "connections": 0,
            "pendingResets": 1
        })
    );
}
