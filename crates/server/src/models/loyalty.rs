//! Loyalty ledger domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fairway_core::{LoyaltyTransactionId, MemberId};

/// One entry in a member's loyalty ledger.
///
/// Positive points are accruals, negative points are redemptions or
/// reversals. The member's `loyalty_points` balance is always the sum of
/// their ledger; both are written in one database transaction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyTransaction {
    /// Unique transaction ID.
    pub id: LoyaltyTransactionId,
    /// The member whose balance changed.
    pub member_id: MemberId,
    /// Signed point delta.
    pub points: i32,
    /// Human-readable reason, e.g. "Tee time booked".
    pub reason: String,
    /// When the transaction was recorded.
    pub created_at: DateTime<Utc>,
}
