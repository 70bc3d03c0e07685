//! Dining order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fairway_core::{MemberId, MenuItemId, OrderId, OrderItemId, OrderStatus, Price};

/// A dining order placed by a member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The ordering member.
    pub member_id: MemberId,
    /// Kitchen status.
    pub status: OrderStatus,
    /// Delivery location, e.g. "Clubhouse Table 4" or "Hole 10 Halfway House".
    pub location: String,
    /// Total at order time; the sum of the line totals.
    pub total: Price,
    /// Free-form notes for the kitchen.
    pub notes: Option<String>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
    /// Order lines. Populated by the detail queries, empty in bare listings.
    pub items: Vec<OrderItem>,
}

/// One line of an order.
///
/// `unit_price` is captured when the order is placed so later menu edits
/// never change historical totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Unique line ID.
    pub id: OrderItemId,
    /// The order this line belongs to.
    pub order_id: OrderId,
    /// The menu item ordered.
    pub menu_item_id: MenuItemId,
    /// Quantity ordered (>= 1).
    pub quantity: i32,
    /// Price per unit at order time.
    pub unit_price: Price,
}

impl OrderItem {
    /// The line total (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}
