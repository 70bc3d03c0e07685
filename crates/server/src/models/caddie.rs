//! Caddie domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fairway_core::CaddieId;

/// A caddie on the club roster.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Caddie {
    /// Unique caddie ID.
    pub id: CaddieId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Short bio shown when picking a caddie.
    pub bio: Option<String>,
    /// Whether the caddie can be assigned to new bookings.
    pub available: bool,
    /// When the caddie was added.
    pub created_at: DateTime<Utc>,
    /// When the roster entry was last updated.
    pub updated_at: DateTime<Utc>,
}
