//! Composition root.
//!
//! Wires the in-memory adapters into the session handlers and builds the
//! router served by the binary. Integration tests build the same graph.

use std::sync::Arc;

use axum::Router;

use crate::adapters::http::{api_router, HealthState, SessionHandlers};
use crate::adapters::websocket::{RoomManager, WebSocketEventBridge, WebSocketState};
use crate::adapters::{InMemoryEventBus, InMemorySessionStore, TokioAutoResetScheduler};
use crate::application::handlers::session::{
    CheckMembershipHandler, ConvertToAdminHandler, CreateSessionHandler, GetParticipantHandler,
    GetSessionHandler, JoinSessionHandler, ResetGameHandler, RevealCardsHandler,
    SelectCardHandler, UpdateDisplayModeHandler, UpdateGameStatusHandler,
};
use crate::config::AppConfig;
use crate::ports::{AutoResetScheduler, EventPublisher, SessionStore};

/// A fully wired application.
pub struct App {
    pub router: Router,
    pub store: Arc<InMemorySessionStore>,
    pub events: Arc<InMemoryEventBus>,
    pub scheduler: Arc<TokioAutoResetScheduler>,
    pub rooms: Arc<RoomManager>,
}

impl App {
    pub fn build(config: &AppConfig) -> Self {
        Self::with_event_bus(config, Arc::new(InMemoryEventBus::new()))
    }

    /// Builds the application around a caller-supplied bus, e.g. a
    /// recording one in tests.
    pub fn with_event_bus(config: &AppConfig, events: Arc<InMemoryEventBus>) -> Self {
        let store = Arc::new(InMemorySessionStore::new());
        let store_port: Arc<dyn SessionStore> = store.clone();
        let publisher: Arc<dyn EventPublisher> = events.clone();

        let scheduler = Arc::new(TokioAutoResetScheduler::new(
            store_port.clone(),
            publisher.clone(),
            config.game.auto_reset_delay(),
        ));
        let scheduler_port: Arc<dyn AutoResetScheduler> = scheduler.clone();

        let rooms = Arc::new(RoomManager::new(config.game.room_channel_capacity));
        WebSocketEventBridge::new_shared(rooms.clone()).register(events.as_ref());

        let handlers = SessionHandlers {
            create: Arc::new(CreateSessionHandler::new(store_port.clone())),
            join: Arc::new(JoinSessionHandler::new(
                store_port.clone(),
                publisher.clone(),
            )),
            get: Arc::new(GetSessionHandler::new(store_port.clone())),
            get_participant: Arc::new(GetParticipantHandler::new(store_port.clone())),
            select_card: Arc::new(SelectCardHandler::new(
                store_port.clone(),
                publisher.clone(),
            )),
            reveal: Arc::new(RevealCardsHandler::new(
                store_port.clone(),
                publisher.clone(),
                scheduler_port.clone(),
            )),
            reset: Arc::new(ResetGameHandler::new(
                store_port.clone(),
                publisher.clone(),
                scheduler_port.clone(),
            )),
            update_display_mode: Arc::new(UpdateDisplayModeHandler::new(
                store_port.clone(),
                publisher.clone(),
            )),
            convert_to_admin: Arc::new(ConvertToAdminHandler::new(
                store_port.clone(),
                publisher.clone(),
            )),
            update_status: Arc::new(UpdateGameStatusHandler::new(
                store_port.clone(),
                publisher,
                scheduler_port,
            )),
        };

        let live = WebSocketState::new(
            rooms.clone(),
            Arc::new(CheckMembershipHandler::new(store_port.clone())),
        );

        let health = HealthState {
            store: store_port,
            rooms: rooms.clone(),
            scheduler: scheduler.clone(),
        };

        let router = api_router(handlers, live, health, &config.server);

        tracing::debug!(
            auto_reset_delay_secs = config.game.auto_reset_delay_secs,
            room_channel_capacity = config.game.room_channel_capacity,
            "application wired"
        );

        Self {
            router,
            store,
            events,
            scheduler,
            rooms,
        }
    }
}
