//! Drive notifications and the outbox that produces the automatic ones.
//!
//! Lifecycle events (drive created, round started/completed, results
//! declared, offer sent) are recorded as outbox events in the same
//! transaction as the change that caused them. A dispatcher later renders
//! each event with [`render_event`] and stores the resulting notification.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Notification kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    General,
    Application,
    Schedule,
    Result,
}

impl NotificationType {
    /// Parse a type string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "general" => Ok(Self::General),
            "application" => Ok(Self::Application),
            "schedule" => Ok(Self::Schedule),
            "result" => Ok(Self::Result),
            _ => Err(CoreError::Validation(format!(
                "Invalid notification type '{s}'. Must be one of: general, application, schedule, result"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Application => "application",
            Self::Schedule => "schedule",
            Self::Result => "result",
        }
    }
}

/// Who produced a notification.
pub const ORIGIN_MANUAL: &str = "manual";
pub const ORIGIN_AUTOMATIC: &str = "automatic";

/// Payload for `POST /placement/{id}/notifications/add-new`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNotification {
    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Notification content is required"))]
    pub content: String,
    #[serde(default = "default_notification_type")]
    pub notification_type: NotificationType,
}

fn default_notification_type() -> NotificationType {
    NotificationType::General
}

// ---------------------------------------------------------------------------
// Outbox
// ---------------------------------------------------------------------------

/// Lifecycle events that produce automatic notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutboxEventType {
    #[serde(rename = "drive.created")]
    DriveCreated,
    #[serde(rename = "round.started")]
    RoundStarted,
    #[serde(rename = "round.completed")]
    RoundCompleted,
    #[serde(rename = "round.results_declared")]
    ResultsDeclared,
    #[serde(rename = "offer.sent")]
    OfferSent,
}

impl OutboxEventType {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "drive.created" => Ok(Self::DriveCreated),
            "round.started" => Ok(Self::RoundStarted),
            "round.completed" => Ok(Self::RoundCompleted),
            "round.results_declared" => Ok(Self::ResultsDeclared),
            "offer.sent" => Ok(Self::OfferSent),
            _ => Err(CoreError::Validation(format!(
                "Unknown outbox event type '{s}'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DriveCreated => "drive.created",
            Self::RoundStarted => "round.started",
            Self::RoundCompleted => "round.completed",
            Self::ResultsDeclared => "round.results_declared",
            Self::OfferSent => "offer.sent",
        }
    }
}

/// Status values for an outbox event.
pub const OUTBOX_PENDING: &str = "pending";
pub const OUTBOX_DELIVERED: &str = "delivered";
pub const OUTBOX_DEAD: &str = "dead";

/// Default number of delivery attempts before an event is marked dead.
pub const DEFAULT_MAX_ATTEMPTS: i32 = 8;

/// First retry delay in seconds; doubles on each further attempt.
pub const RETRY_BASE_SECS: i64 = 5;

/// Upper bound for the retry delay in seconds.
pub const RETRY_MAX_SECS: i64 = 600;

/// Delay before the next attempt after `attempts` failed attempts.
pub fn retry_delay(attempts: i32) -> chrono::Duration {
    let exponent = attempts.saturating_sub(1).clamp(0, 16) as u32;
    let secs = RETRY_BASE_SECS
        .saturating_mul(2_i64.saturating_pow(exponent))
        .min(RETRY_MAX_SECS);
    chrono::Duration::seconds(secs)
}

/// Whether an event that has failed `attempts` times should be given up on.
pub fn is_exhausted(attempts: i32, max_attempts: i32) -> bool {
    attempts >= max_attempts
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Subject, HTML content and type of an automatic notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    pub subject: String,
    pub content: String,
    pub notification_type: NotificationType,
}

/// Render the notification for an outbox event.
///
/// Payload keys used: `drive_title`, `company_name`, `round_name`,
/// `round_number`, `venue`, `result_message`, `result_description`,
/// `selected_count`, `student_name`, `expiry_date`.
pub fn render_event(
    event_type: OutboxEventType,
    payload: &serde_json::Value,
) -> RenderedNotification {
    let text = |key: &str| {
        escape_html(
            payload
                .get(key)
                .and_then(|v| match v {
                    serde_json::Value::String(s) => Some(s.clone()),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .as_deref()
                .unwrap_or(""),
        )
    };
    let drive = text("drive_title");
    let company = text("company_name");
    let round = format!("Round {} ({})", text("round_number"), text("round_name"));

    match event_type {
        OutboxEventType::DriveCreated => RenderedNotification {
            subject: format!("New placement drive: {drive}"),
            content: format!(
                "<p>{company} has opened the placement drive <strong>{drive}</strong>. \
                 Check your eligibility and apply before the deadline.</p>"
            ),
            notification_type: NotificationType::Application,
        },
        OutboxEventType::RoundStarted => {
            let venue = text("venue");
            let venue_line = if venue.is_empty() {
                String::new()
            } else {
                format!(" Venue: {venue}.")
            };
            RenderedNotification {
                subject: format!("{drive}: {round} has started"),
                content: format!("<p>{round} of <strong>{drive}</strong> is now ongoing.{venue_line}</p>"),
                notification_type: NotificationType::Schedule,
            }
        }
        OutboxEventType::RoundCompleted => RenderedNotification {
            subject: format!("{drive}: {round} completed"),
            content: format!(
                "<p>{round} of <strong>{drive}</strong> is complete. Results will be announced shortly.</p>"
            ),
            notification_type: NotificationType::Schedule,
        },
        OutboxEventType::ResultsDeclared => {
            let message = text("result_message");
            let description = text("result_description");
            let count = text("selected_count");
            RenderedNotification {
                subject: format!("{drive}: results of {round}"),
                content: format!(
                    "<p><strong>{message}</strong></p><p>{description}</p>\
                     <p>Students selected: {count}</p>"
                ),
                notification_type: NotificationType::Result,
            }
        }
        OutboxEventType::OfferSent => {
            let student = text("student_name");
            let expiry = text("expiry_date");
            let expiry_line = if expiry.is_empty() {
                String::new()
            } else {
                format!(" Please respond by {expiry}.")
            };
            RenderedNotification {
                subject: format!("{drive}: offer letter issued"),
                content: format!(
                    "<p>An offer letter from {company} has been issued to {student}.{expiry_line}</p>"
                ),
                notification_type: NotificationType::Result,
            }
        }
    }
}

/// Escape text for inclusion in notification HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
