//! Session-related types for authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use fairway_core::{Email, MemberId, UserId, UserRole};

/// Session-stored identity.
///
/// Minimal data stored in the session to identify the logged-in user.
/// `member_id` is `None` for staff and admin accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub user_id: UserId,
    /// Linked member profile, when the user is a member.
    pub member_id: Option<MemberId>,
    /// User's email address.
    pub email: Email,
    /// User's role.
    pub role: UserRole,
}

impl CurrentUser {
    /// Whether this user may use the admin/staff surface.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
