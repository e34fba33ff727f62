//! Event bus and notification delivery for the placement portal.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, used to wake background services.
//! - [`OutboxDispatcher`]: background service that turns outbox events
//!   into drive notifications and pushes them to external channels.
//! - [`delivery`]: external delivery channels (webhook).

pub mod bus;
pub mod delivery;
pub mod dispatcher;

pub use bus::{EventBus, PlatformEvent};
pub use delivery::webhook::WebhookDelivery;
pub use delivery::{DeliveryChannel, DeliveryError};
pub use dispatcher::{DispatchSummary, DispatcherConfig, OutboxDispatcher};
