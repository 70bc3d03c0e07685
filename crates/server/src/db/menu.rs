//! Dining menu repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fairway_core::{MenuCategory, MenuItemId, Price};

use super::RepositoryError;
use crate::models::MenuItem;

/// Internal row type for `menu_items` queries.
#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    category: MenuCategory,
    price: Price,
    available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        Self {
            id: MenuItemId::new(row.id),
            name: row.name,
            description: row.description,
            category: row.category,
            price: row.price,
            available: row.available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const MENU_COLUMNS: &str =
    "id, name, description, category, price, available, created_at, updated_at";

/// Fields for creating a menu item.
#[derive(Debug)]
pub struct NewMenuItem<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: MenuCategory,
    pub price: Price,
    pub available: bool,
}

/// Repository for the clubhouse menu.
pub struct MenuRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuRepository<'a> {
    /// Create a new menu repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List available items, optionally for one category, grouped for the
    /// menu card.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_available(
        &self,
        category: Option<MenuCategory>,
    ) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items
             WHERE available AND ($1::menu_category IS NULL OR category = $1)
             ORDER BY category, name"
        ))
        .bind(category)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List everything, including unavailable items (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items ORDER BY category, name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an item by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Add an item to the menu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, item: NewMenuItem<'_>) -> Result<MenuItem, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "INSERT INTO menu_items (name, description, category, price, available)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {MENU_COLUMNS}"
        ))
        .bind(item.name)
        .bind(item.description)
        .bind(item.category)
        .bind(item.price)
        .bind(item.available)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update an item. `None` fields are left as-is.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: MenuItemId,
        name: Option<&str>,
        description: Option<&str>,
        category: Option<MenuCategory>,
        price: Option<Price>,
        available: Option<bool>,
    ) -> Result<MenuItem, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "UPDATE menu_items
             SET name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 category = COALESCE($4, category),
                 price = COALESCE($5, price),
                 available = COALESCE($6, available),
                 updated_at = now()
             WHERE id = $1
             RETURNING {MENU_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(category)
        .bind(price)
        .bind(available)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Remove an item from the menu.
    ///
    /// Fails with `Conflict` if the item appears on past orders; mark it
    /// unavailable instead to keep order history intact.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Conflict` if past orders reference it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: MenuItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict(
                        "item appears on existing orders; mark it unavailable instead".to_owned(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
