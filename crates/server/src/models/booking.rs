//! Tee-time booking domain type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use fairway_core::{BookingId, BookingStatus, CaddieId, MemberId};

/// A tee-time reservation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique booking ID.
    pub id: BookingId,
    /// The member who booked.
    pub member_id: MemberId,
    /// Assigned caddie, if any.
    pub caddie_id: Option<CaddieId>,
    /// Day of play.
    pub booking_date: NaiveDate,
    /// Canonical "HH:MM" tee-sheet slot.
    pub time_slot: String,
    /// Party size (1-4).
    pub players: i32,
    /// Holes to play (9 or 18).
    pub holes: i32,
    /// Booking status.
    pub status: BookingStatus,
    /// Free-form notes for the starter.
    pub notes: Option<String>,
    /// When the booking was made.
    pub created_at: DateTime<Utc>,
    /// When the booking was last changed.
    pub updated_at: DateTime<Utc>,
}
