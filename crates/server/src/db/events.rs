//! Club event repository.
//!
//! Registration is transactional: the seat count is checked under a row lock
//! on the event, so two members cannot both take the last seat. Duplicate
//! registrations surface as `RepositoryError::Conflict` via the unique index
//! on (event_id, member_id).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fairway_core::{EventId, EventRegistrationId, EventStatus, MemberId, NotificationKind};

use super::RepositoryError;
use super::notifications::insert_notification;
use crate::models::{Event, EventRegistration};

/// Internal row type for `events` queries.
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    event_date: NaiveDate,
    start_time: String,
    capacity: Option<i32>,
    status: EventStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: EventId::new(row.id),
            title: row.title,
            description: row.description,
            event_date: row.event_date,
            start_time: row.start_time,
            capacity: row.capacity,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Internal row type for `event_registrations` queries.
#[derive(Debug, sqlx::FromRow)]
struct EventRegistrationRow {
    id: Uuid,
    event_id: Uuid,
    member_id: Uuid,
    registered_at: DateTime<Utc>,
}

impl From<EventRegistrationRow> for EventRegistration {
    fn from(row: EventRegistrationRow) -> Self {
        Self {
            id: EventRegistrationId::new(row.id),
            event_id: EventId::new(row.event_id),
            member_id: MemberId::new(row.member_id),
            registered_at: row.registered_at,
        }
    }
}

const EVENT_COLUMNS: &str =
    "id, title, description, event_date, start_time, capacity, status, created_at, updated_at";

const REGISTRATION_COLUMNS: &str = "id, event_id, member_id, registered_at";

/// Fields for creating an event.
#[derive(Debug)]
pub struct NewEvent<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub event_date: NaiveDate,
    pub start_time: &'a str,
    pub capacity: Option<i32>,
}

/// Repository for club events and registrations.
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    /// Create a new event repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List events, soonest first. When `upcoming_only` is set, only
    /// scheduled events on or after `today` are returned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        upcoming_only: bool,
        today: NaiveDate,
    ) -> Result<Vec<Event>, RepositoryError> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events
             WHERE ($1 = FALSE OR (status = 'scheduled' AND event_date >= $2))
             ORDER BY event_date, start_time"
        ))
        .bind(upcoming_only)
        .bind(today)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an event by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, RepositoryError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Schedule an event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, event: NewEvent<'_>) -> Result<Event, RepositoryError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "INSERT INTO events (title, description, event_date, start_time, capacity)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(event.title)
        .bind(event.description)
        .bind(event.event_date)
        .bind(event.start_time)
        .bind(event.capacity)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update an event. `None` fields are left as-is.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the event doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: EventId,
        title: Option<&str>,
        description: Option<&str>,
        event_date: Option<NaiveDate>,
        start_time: Option<&str>,
        capacity: Option<Option<i32>>,
        status: Option<EventStatus>,
    ) -> Result<Event, RepositoryError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "UPDATE events
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 event_date = COALESCE($4, event_date),
                 start_time = COALESCE($5, start_time),
                 capacity = CASE WHEN $6 THEN $7 ELSE capacity END,
                 status = COALESCE($8, status),
                 updated_at = now()
             WHERE id = $1
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(event_date)
        .bind(start_time)
        .bind(capacity.is_some())
        .bind(capacity.flatten())
        .bind(status)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Register a member for an event.
    ///
    /// Capacity is checked under a row lock on the event so the last seat
    /// cannot be taken twice.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the event doesn't exist.
    /// Returns `RepositoryError::Conflict` if the member is already
    /// registered, the event is not open for registration, or it is full.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn register(
        &self,
        event_id: EventId,
        member_id: MemberId,
    ) -> Result<EventRegistration, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 FOR UPDATE"
        ))
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        if event.status != EventStatus::Scheduled {
            return Err(RepositoryError::Conflict(
                "event is not open for registration".to_owned(),
            ));
        }

        if let Some(capacity) = event.capacity {
            let registered = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM event_registrations WHERE event_id = $1",
            )
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await?;

            if registered >= i64::from(capacity) {
                return Err(RepositoryError::Conflict("event is full".to_owned()));
            }
        }

        let row = sqlx::query_as::<_, EventRegistrationRow>(&format!(
            "INSERT INTO event_registrations (event_id, member_id)
             VALUES ($1, $2)
             RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(event_id)
        .bind(member_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::on_unique(e, "already registered for this event"))?;

        insert_notification(
            &mut tx,
            member_id,
            NotificationKind::Event,
            "Event registration confirmed",
            &format!(
                "You are registered for {} on {}.",
                event.title, event.event_date
            ),
        )
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Withdraw a member's registration.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the member is not registered.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn unregister(
        &self,
        event_id: EventId,
        member_id: MemberId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM event_registrations WHERE event_id = $1 AND member_id = $2",
        )
        .bind(event_id)
        .bind(member_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// The registrations for an event, earliest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn registrations(
        &self,
        event_id: EventId,
    ) -> Result<Vec<EventRegistration>, RepositoryError> {
        let rows = sqlx::query_as::<_, EventRegistrationRow>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM event_registrations
             WHERE event_id = $1
             ORDER BY registered_at"
        ))
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Cancel an event and notify everyone registered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the event doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn cancel(&self, id: EventId) -> Result<Event, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, EventRow>(&format!(
            "UPDATE events SET status = 'cancelled', updated_at = now()
             WHERE id = $1 AND status = 'scheduled'
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let registered = sqlx::query_scalar::<_, Uuid>(
            "SELECT member_id FROM event_registrations WHERE event_id = $1",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        for member_id in registered {
            insert_notification(
                &mut tx,
                MemberId::new(member_id),
                NotificationKind::Event,
                "Event cancelled",
                &format!("{} on {} has been cancelled.", row.title, row.event_date),
            )
            .await?;
        }

        tx.commit().await?;

        Ok(row.into())
    }
}
