//! In-app notification repository.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use fairway_core::{MemberId, NotificationId, NotificationKind};

use super::RepositoryError;
use crate::models::Notification;

/// Internal row type for `notifications` queries.
#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    member_id: Uuid,
    kind: NotificationKind,
    title: String,
    body: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: NotificationId::new(row.id),
            member_id: MemberId::new(row.member_id),
            kind: row.kind,
            title: row.title,
            body: row.body,
            read: row.read,
            created_at: row.created_at,
        }
    }
}

/// Insert a notification inside an open transaction.
///
/// Used by the booking, order, and event repositories for their
/// notification side effects.
pub(crate) async fn insert_notification(
    tx: &mut Transaction<'_, Postgres>,
    member_id: MemberId,
    kind: NotificationKind,
    title: &str,
    body: &str,
) -> Result<(), RepositoryError> {
    sqlx::query("INSERT INTO notifications (member_id, kind, title, body) VALUES ($1, $2, $3, $4)")
        .bind(member_id)
        .bind(kind)
        .bind(title)
        .bind(body)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Repository for in-app notifications.
pub struct NotificationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NotificationRepository<'a> {
    /// Create a new notification repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// A member's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        member_id: MemberId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT id, member_id, kind, title, body, read, created_at
             FROM notifications
             WHERE member_id = $1 AND ($2 = FALSE OR read = FALSE)
             ORDER BY created_at DESC",
        )
        .bind(member_id)
        .bind(unread_only)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Mark one notification read. Scoped to the owning member so a member
    /// cannot touch someone else's notifications.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the notification doesn't exist
    /// or belongs to another member.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn mark_read(
        &self,
        id: NotificationId,
        member_id: MemberId,
    ) -> Result<Notification, RepositoryError> {
        let row = sqlx::query_as::<_, NotificationRow>(
            "UPDATE notifications SET read = TRUE
             WHERE id = $1 AND member_id = $2
             RETURNING id, member_id, kind, title, body, read, created_at",
        )
        .bind(id)
        .bind(member_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Mark all of a member's notifications read. Returns how many changed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_all_read(&self, member_id: MemberId) -> Result<u64, RepositoryError> {
        let result =
            sqlx::query("UPDATE notifications SET read = TRUE WHERE member_id = $1 AND read = FALSE")
                .bind(member_id)
                .execute(self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}
