//! In-app notification domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fairway_core::{MemberId, NotificationId, NotificationKind};

/// An in-app notification for a member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification ID.
    pub id: NotificationId,
    /// The member this notification belongs to.
    pub member_id: MemberId,
    /// Category for icons and deep links.
    pub kind: NotificationKind,
    /// Short title.
    pub title: String,
    /// Message body.
    pub body: String,
    /// Whether the member has read it.
    pub read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}
