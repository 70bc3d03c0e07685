//! Status and role enums for club entities.
//!
//! Each enum maps to a Postgres enum type of the same snake_case name
//! (created in the server migrations) when the `postgres` feature is enabled.

use serde::{Deserialize, Serialize};

/// Login role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access including member management and settings.
    Admin,
    /// Operational access: tee sheet, orders, events.
    Staff,
    /// A club member.
    Member,
}

impl UserRole {
    /// Whether this role may use the admin/staff management surface.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Staff)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Staff => write!(f, "staff"),
            Self::Member => write!(f, "member"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            "member" => Ok(Self::Member),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Membership tier, derived from loyalty standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "member_tier", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum MemberTier {
    #[default]
    Standard,
    Silver,
    Gold,
}

/// Tee-time booking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "booking_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Cancelled,
    Completed,
}

/// Dining order status.
///
/// `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "order_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Placed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in this status can move to `next`.
    ///
    /// Orders advance strictly forward (placed -> preparing -> ready ->
    /// delivered) and can be cancelled from any non-terminal status.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Placed, Self::Preparing | Self::Cancelled)
                | (Self::Preparing, Self::Ready | Self::Cancelled)
                | (Self::Ready, Self::Delivered | Self::Cancelled)
        )
    }

    /// Whether this status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Placed => write!(f, "placed"),
            Self::Preparing => write!(f, "preparing"),
            Self::Ready => write!(f, "ready"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Menu item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "menu_category", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Starters,
    Mains,
    Desserts,
    Beverages,
}

impl std::str::FromStr for MenuCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starters" => Ok(Self::Starters),
            "mains" => Ok(Self::Mains),
            "desserts" => Ok(Self::Desserts),
            "beverages" => Ok(Self::Beverages),
            _ => Err(format!("invalid menu category: {s}")),
        }
    }
}

impl std::fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Starters => write!(f, "starters"),
            Self::Mains => write!(f, "mains"),
            Self::Desserts => write!(f, "desserts"),
            Self::Beverages => write!(f, "beverages"),
        }
    }
}

/// Club event status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "event_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Scheduled,
    Cancelled,
    Completed,
}

/// Notification category, used by clients to pick an icon and a deep link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "notification_kind", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Booking,
    Order,
    Event,
    Loyalty,
    #[default]
    General,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_roundtrip() {
        for role in [UserRole::Admin, UserRole::Staff, UserRole::Member] {
            let parsed: UserRole = role.to_string().parse().expect("roundtrip");
            assert_eq!(parsed, role);
        }
        assert!("greenskeeper".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_is_staff() {
        assert!(UserRole::Admin.is_staff());
        assert!(UserRole::Staff.is_staff());
        assert!(!UserRole::Member.is_staff());
    }

    #[test]
    fn test_order_status_transitions() {
        use OrderStatus::*;

        assert!(Placed.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Delivered));
        assert!(Placed.can_transition_to(Cancelled));

        // No skipping ahead or moving backwards
        assert!(!Placed.can_transition_to(Ready));
        assert!(!Ready.can_transition_to(Preparing));

        // Terminal statuses stay terminal
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Placed));
        assert!(Delivered.is_terminal());
        assert!(Cancelled.is_terminal());
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Preparing).expect("serialize");
        assert_eq!(json, "\"preparing\"");

        let kind: NotificationKind = serde_json::from_str("\"loyalty\"").expect("deserialize");
        assert_eq!(kind, NotificationKind::Loyalty);
    }
}
