//! Dining order repository.
//!
//! Order creation prices every line from the live menu, captures the unit
//! prices on the order lines, and writes the order, its lines, the loyalty
//! accrual, and the confirmation notification in one transaction. Cancelling
//! an order reverses the accrued points with a ledgered debit.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use fairway_core::{
    MemberId, MenuItemId, NotificationKind, OrderId, OrderItemId, OrderStatus, Price,
};

use super::RepositoryError;
use super::loyalty::record_points;
use super::notifications::insert_notification;
use crate::models::{Order, OrderItem};

/// Internal row type for `orders` queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    member_id: Uuid,
    status: OrderStatus,
    location: String,
    total: Price,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: OrderId::new(self.id),
            member_id: MemberId::new(self.member_id),
            status: self.status,
            location: self.location,
            total: self.total,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items,
        }
    }
}

/// Internal row type for `order_items` queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: Uuid,
    order_id: Uuid,
    menu_item_id: Uuid,
    quantity: i32,
    unit_price: Price,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            menu_item_id: MenuItemId::new(row.menu_item_id),
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}

const ORDER_COLUMNS: &str = "id, member_id, status, location, total, notes, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, order_id, menu_item_id, quantity, unit_price";

/// One requested line of a new order.
#[derive(Debug)]
pub struct NewOrderLine {
    pub menu_item_id: MenuItemId,
    pub quantity: i32,
}

/// Fields for placing an order.
#[derive(Debug)]
pub struct NewOrder<'a> {
    pub member_id: MemberId,
    pub location: &'a str,
    pub notes: Option<&'a str>,
    pub lines: Vec<NewOrderLine>,
}

/// Repository for dining orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an order with its lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut items = self.load_items(&[row.id]).await?;
        let lines = items.remove(&row.id).unwrap_or_default();
        Ok(Some(row.into_order(lines)))
    }

    /// A member's orders with their lines, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE member_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(member_id)
        .fetch_all(self.pool)
        .await?;

        self.assemble(rows).await
    }

    /// All orders, optionally filtered by status (kitchen view), newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE $1::order_status IS NULL OR status = $1
             ORDER BY created_at DESC"
        ))
        .bind(status)
        .fetch_all(self.pool)
        .await?;

        self.assemble(rows).await
    }

    /// Place an order.
    ///
    /// Every line is priced from the current menu and the unit price is
    /// captured on the line. Loyalty points accrue at one point per whole
    /// currency unit of the total.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Rejected` if the order is empty, a quantity
    /// is not positive, or a line names an unknown or unavailable item.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, order: NewOrder<'_>) -> Result<Order, RepositoryError> {
        if order.lines.is_empty() {
            return Err(RepositoryError::Rejected(
                "order must contain at least one item".to_owned(),
            ));
        }
        if order.lines.iter().any(|line| line.quantity < 1) {
            return Err(RepositoryError::Rejected(
                "item quantity must be at least one".to_owned(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let priced = price_lines(&mut tx, &order.lines).await?;
        let total: Price = priced
            .iter()
            .map(|(line, unit_price)| unit_price.times(line.quantity))
            .sum();

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders (member_id, location, total, notes)
             VALUES ($1, $2, $3, $4)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order.member_id)
        .bind(order.location)
        .bind(total)
        .bind(order.notes)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(priced.len());
        for (line, unit_price) in &priced {
            let item = sqlx::query_as::<_, OrderItemRow>(&format!(
                "INSERT INTO order_items (order_id, menu_item_id, quantity, unit_price)
                 VALUES ($1, $2, $3, $4)
                 RETURNING {ITEM_COLUMNS}"
            ))
            .bind(row.id)
            .bind(line.menu_item_id)
            .bind(line.quantity)
            .bind(*unit_price)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item.into());
        }

        let points = accrued_points(total);
        if points > 0 {
            record_points(&mut tx, order.member_id, points, "Dining order placed").await?;
        }

        insert_notification(
            &mut tx,
            order.member_id,
            NotificationKind::Order,
            "Order received",
            &format!("Your order for {} has been sent to the kitchen.", row.location),
        )
        .await?;

        tx.commit().await?;

        Ok(row.into_order(items))
    }

    /// Move an order along the kitchen workflow.
    ///
    /// Statuses only move forward; cancelling is allowed from any
    /// non-terminal status and reverses the loyalty points the order earned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Conflict` if the transition is not allowed.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: OrderId,
        new_status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        if !current.status.can_transition_to(new_status) {
            return Err(RepositoryError::Conflict(format!(
                "order cannot move from {} to {new_status}",
                current.status
            )));
        }

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = $2, updated_at = now()
             WHERE id = $1
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(new_status)
        .fetch_one(&mut *tx)
        .await?;

        let member_id = MemberId::new(row.member_id);

        if new_status == OrderStatus::Cancelled {
            let points = accrued_points(row.total);
            if points > 0 {
                record_points(&mut tx, member_id, -points, "Dining order cancelled").await?;
            }
        }

        insert_notification(
            &mut tx,
            member_id,
            NotificationKind::Order,
            "Order update",
            &format!("Your order for {} is now {new_status}.", row.location),
        )
        .await?;

        tx.commit().await?;

        let mut items = self.load_items(&[row.id]).await?;
        let lines = items.remove(&row.id).unwrap_or_default();
        Ok(row.into_order(lines))
    }

    async fn assemble(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, RepositoryError> {
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut items = self.load_items(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let lines = items.remove(&row.id).unwrap_or_default();
                row.into_order(lines)
            })
            .collect())
    }

    async fn load_items(
        &self,
        order_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<OrderItem>>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, OrderItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ANY($1)"
        ))
        .bind(order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for row in rows {
            grouped.entry(row.order_id).or_default().push(row.into());
        }

        Ok(grouped)
    }
}

/// Resolve each requested line against the live menu, returning the captured
/// unit price alongside the line.
async fn price_lines<'l>(
    tx: &mut Transaction<'_, Postgres>,
    lines: &'l [NewOrderLine],
) -> Result<Vec<(&'l NewOrderLine, Price)>, RepositoryError> {
    let ids: Vec<Uuid> = lines.iter().map(|line| line.menu_item_id.as_uuid()).collect();

    let menu = sqlx::query_as::<_, (Uuid, Price, bool)>(
        "SELECT id, price, available FROM menu_items WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(&mut **tx)
    .await?;

    let by_id: HashMap<Uuid, (Price, bool)> = menu
        .into_iter()
        .map(|(id, price, available)| (id, (price, available)))
        .collect();

    let mut priced = Vec::with_capacity(lines.len());
    for line in lines {
        let Some(&(unit_price, available)) = by_id.get(&line.menu_item_id.as_uuid()) else {
            return Err(RepositoryError::Rejected(
                "order references an unknown menu item".to_owned(),
            ));
        };
        if !available {
            return Err(RepositoryError::Rejected(
                "order references an item that is not currently available".to_owned(),
            ));
        }
        priced.push((line, unit_price));
    }

    Ok(priced)
}

/// Loyalty points for an order total: one point per whole currency unit.
fn accrued_points(total: Price) -> i32 {
    i32::try_from(total.whole_units()).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn price(mantissa: i64, scale: u32) -> Price {
        Price::new(Decimal::new(mantissa, scale))
    }

    #[test]
    fn accrued_points_truncates_to_whole_units() {
        assert_eq!(accrued_points(price(4250, 2)), 42);
        assert_eq!(accrued_points(price(99, 2)), 0);
        assert_eq!(accrued_points(Price::ZERO), 0);
    }
}
