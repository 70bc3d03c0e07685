//! Loyalty ledger repository.
//!
//! Every balance change writes a `loyalty_transactions` row and updates the
//! materialized `members.loyalty_points` balance in the same transaction, so
//! the ledger and the balance cannot diverge. The non-negative balance CHECK
//! rejects overdrafts at the database.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use fairway_core::{LoyaltyTransactionId, MemberId};

use super::RepositoryError;
use crate::models::LoyaltyTransaction;

/// Internal row type for `loyalty_transactions` queries.
#[derive(Debug, sqlx::FromRow)]
struct LoyaltyTransactionRow {
    id: Uuid,
    member_id: Uuid,
    points: i32,
    reason: String,
    created_at: DateTime<Utc>,
}

impl From<LoyaltyTransactionRow> for LoyaltyTransaction {
    fn from(row: LoyaltyTransactionRow) -> Self {
        Self {
            id: LoyaltyTransactionId::new(row.id),
            member_id: MemberId::new(row.member_id),
            points: row.points,
            reason: row.reason,
            created_at: row.created_at,
        }
    }
}

/// Apply a signed point delta inside an open transaction.
///
/// Shared by the booking, order, and loyalty repositories so every accrual
/// path goes through the same ledger write.
pub(crate) async fn record_points(
    tx: &mut Transaction<'_, Postgres>,
    member_id: MemberId,
    points: i32,
    reason: &str,
) -> Result<(), RepositoryError> {
    let updated = sqlx::query(
        "UPDATE members SET loyalty_points = loyalty_points + $2, updated_at = now()
         WHERE id = $1",
    )
    .bind(member_id)
    .bind(points)
    .execute(&mut **tx)
    .await
    .map_err(|e| RepositoryError::on_check(e, "insufficient loyalty points"))?;

    if updated.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }

    sqlx::query("INSERT INTO loyalty_transactions (member_id, points, reason) VALUES ($1, $2, $3)")
        .bind(member_id)
        .bind(points)
        .bind(reason)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Repository for the loyalty ledger.
pub struct LoyaltyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LoyaltyRepository<'a> {
    /// Create a new loyalty repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// A member's ledger, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn transactions(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<LoyaltyTransaction>, RepositoryError> {
        let rows = sqlx::query_as::<_, LoyaltyTransactionRow>(
            "SELECT id, member_id, points, reason, created_at
             FROM loyalty_transactions
             WHERE member_id = $1
             ORDER BY created_at DESC",
        )
        .bind(member_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Manually credit or debit a member (admin operation).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the member doesn't exist.
    /// Returns `RepositoryError::Rejected` if the debit would overdraw the
    /// balance.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn adjust(
        &self,
        member_id: MemberId,
        points: i32,
        reason: &str,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        record_points(&mut tx, member_id, points, reason).await?;
        tx.commit().await?;
        Ok(())
    }
}
