//! Member profile repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fairway_core::{MemberId, MemberTier, UserId};

use super::RepositoryError;
use crate::models::Member;

/// Internal row type for `members` queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MemberRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub membership_number: String,
    pub tier: MemberTier,
    pub loyalty_points: i32,
    pub joined_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self {
            id: MemberId::new(row.id),
            user_id: UserId::new(row.user_id),
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            membership_number: row.membership_number,
            tier: row.tier,
            loyalty_points: row.loyalty_points,
            joined_at: row.joined_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const MEMBER_COLUMNS: &str = "id, user_id, first_name, last_name, phone, membership_number, \
                              tier, loyalty_points, joined_at, created_at, updated_at";

/// Profile fields a member may change themselves.
#[derive(Debug, Default)]
pub struct MemberProfileUpdate<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub phone: Option<Option<&'a str>>,
}

/// Repository for member profiles.
pub struct MemberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MemberRepository<'a> {
    /// Create a new member repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all members, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Member>, RepositoryError> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a member by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: MemberId) -> Result<Option<Member>, RepositoryError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Get the member profile linked to a login account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user_id(&self, user_id: UserId) -> Result<Option<Member>, RepositoryError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Update a member's own profile fields. `None` fields are left as-is.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the member doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_profile(
        &self,
        id: MemberId,
        update: MemberProfileUpdate<'_>,
    ) -> Result<Member, RepositoryError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "UPDATE members
             SET first_name = COALESCE($2, first_name),
                 last_name = COALESCE($3, last_name),
                 phone = CASE WHEN $4 THEN $5 ELSE phone END,
                 updated_at = now()
             WHERE id = $1
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(id)
        .bind(update.first_name)
        .bind(update.last_name)
        .bind(update.phone.is_some())
        .bind(update.phone.flatten())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Update a member's tier (admin operation).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the member doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_tier(
        &self,
        id: MemberId,
        tier: MemberTier,
    ) -> Result<Member, RepositoryError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "UPDATE members SET tier = $2, updated_at = now()
             WHERE id = $1
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(id)
        .bind(tier)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a member and their login account.
    ///
    /// Bookings, orders, registrations, ledger entries, and notifications
    /// cascade per the schema.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the member doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: MemberId) -> Result<(), RepositoryError> {
        // Deleting the user row cascades to the member profile and onward.
        let result = sqlx::query(
            "DELETE FROM users WHERE id = (SELECT user_id FROM members WHERE id = $1)",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
