//! User and member domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fairway_core::{Email, MemberId, MemberTier, UserId, UserRole};

/// A login account.
///
/// Admins and staff have accounts without a member profile; members have a
/// linked [`Member`] row. The password hash never leaves the db layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email address.
    pub email: Email,
    /// Permission level.
    pub role: UserRole,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A club member profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Unique member ID.
    pub id: MemberId,
    /// The login account this profile belongs to.
    pub user_id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Printed membership card number.
    pub membership_number: String,
    /// Membership tier.
    pub tier: MemberTier,
    /// Current loyalty point balance.
    pub loyalty_points: i32,
    /// When the membership started.
    pub joined_at: DateTime<Utc>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
