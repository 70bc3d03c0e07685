//! Club event domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use fairway_core::{EventId, EventRegistrationId, EventStatus, MemberId};

/// A club event (tournament, social night, clinic).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event ID.
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Day of the event.
    pub event_date: NaiveDate,
    /// Start time as "HH:MM".
    pub start_time: String,
    /// Maximum registrations, unlimited when `None`.
    pub capacity: Option<i32>,
    /// Event status.
    pub status: EventStatus,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A member's registration for an event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistration {
    /// Unique registration ID.
    pub id: EventRegistrationId,
    /// The event registered for.
    pub event_id: EventId,
    /// The registered member.
    pub member_id: MemberId,
    /// When the member registered.
    pub registered_at: DateTime<Utc>,
}
