use std::sync::Arc;

use placement_events::{EventBus, PlatformEvent};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: placement_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Wakes the outbox dispatcher after a change queued outbox events.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Tell the dispatcher that `event_type` was queued for a drive.
    pub fn notify_outbox(&self, drive_id: placement_core::types::DbId, event_type: &str) {
        self.event_bus
            .publish(PlatformEvent::outbox_enqueued(drive_id, event_type));
    }
}
