//! Dining menu domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fairway_core::{MenuCategory, MenuItemId, Price};

/// An item on the clubhouse menu.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Unique item ID.
    pub id: MenuItemId,
    /// Display name.
    pub name: String,
    /// Longer description for the menu card.
    pub description: Option<String>,
    /// Menu section.
    pub category: MenuCategory,
    /// Current price.
    pub price: Price,
    /// Whether the item can currently be ordered.
    pub available: bool,
    /// When the item was added.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}
