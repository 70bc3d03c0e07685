//! Caddie roster repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fairway_core::CaddieId;

use super::RepositoryError;
use crate::models::Caddie;

/// Internal row type for `caddies` queries.
#[derive(Debug, sqlx::FromRow)]
struct CaddieRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    bio: Option<String>,
    available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CaddieRow> for Caddie {
    fn from(row: CaddieRow) -> Self {
        Self {
            id: CaddieId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            bio: row.bio,
            available: row.available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const CADDIE_COLUMNS: &str = "id, first_name, last_name, bio, available, created_at, updated_at";

/// Fields for creating or replacing a roster entry.
#[derive(Debug)]
pub struct NewCaddie<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub bio: Option<&'a str>,
    pub available: bool,
}

/// Repository for the caddie roster.
pub struct CaddieRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CaddieRepository<'a> {
    /// Create a new caddie repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List caddies, optionally only the available ones.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, available_only: bool) -> Result<Vec<Caddie>, RepositoryError> {
        let rows = sqlx::query_as::<_, CaddieRow>(&format!(
            "SELECT {CADDIE_COLUMNS} FROM caddies
             WHERE ($1 = FALSE OR available)
             ORDER BY last_name, first_name"
        ))
        .bind(available_only)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a caddie by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CaddieId) -> Result<Option<Caddie>, RepositoryError> {
        let row = sqlx::query_as::<_, CaddieRow>(&format!(
            "SELECT {CADDIE_COLUMNS} FROM caddies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Add a caddie to the roster.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, caddie: NewCaddie<'_>) -> Result<Caddie, RepositoryError> {
        let row = sqlx::query_as::<_, CaddieRow>(&format!(
            "INSERT INTO caddies (first_name, last_name, bio, available)
             VALUES ($1, $2, $3, $4)
             RETURNING {CADDIE_COLUMNS}"
        ))
        .bind(caddie.first_name)
        .bind(caddie.last_name)
        .bind(caddie.bio)
        .bind(caddie.available)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a roster entry. `None` fields are left as-is.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the caddie doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CaddieId,
        first_name: Option<&str>,
        last_name: Option<&str>,
        bio: Option<&str>,
        available: Option<bool>,
    ) -> Result<Caddie, RepositoryError> {
        let row = sqlx::query_as::<_, CaddieRow>(&format!(
            "UPDATE caddies
             SET first_name = COALESCE($2, first_name),
                 last_name = COALESCE($3, last_name),
                 bio = COALESCE($4, bio),
                 available = COALESCE($5, available),
                 updated_at = now()
             WHERE id = $1
             RETURNING {CADDIE_COLUMNS}"
        ))
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(bio)
        .bind(available)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Remove a caddie from the roster.
    ///
    /// Existing bookings keep their history with `caddie_id` set to NULL.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the caddie doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: CaddieId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM caddies WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
