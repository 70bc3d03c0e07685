//! Tee-time booking repository.
//!
//! Booking creation is transactional: the booking row, the loyalty accrual,
//! and the confirmation notification all land together or not at all. Slot
//! conflicts surface as `RepositoryError::Conflict` via the partial unique
//! index on (booking_date, time_slot).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fairway_core::{BookingId, BookingStatus, CaddieId, MemberId, NotificationKind};

use super::RepositoryError;
use super::loyalty::record_points;
use super::notifications::insert_notification;
use crate::models::Booking;

/// Loyalty points accrued when a tee time is booked.
pub const BOOKING_LOYALTY_POINTS: i32 = 25;

/// Internal row type for `bookings` queries.
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    member_id: Uuid,
    caddie_id: Option<Uuid>,
    booking_date: NaiveDate,
    time_slot: String,
    players: i32,
    holes: i32,
    status: BookingStatus,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: BookingId::new(row.id),
            member_id: MemberId::new(row.member_id),
            caddie_id: row.caddie_id.map(CaddieId::new),
            booking_date: row.booking_date,
            time_slot: row.time_slot,
            players: row.players,
            holes: row.holes,
            status: row.status,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const BOOKING_COLUMNS: &str = "id, member_id, caddie_id, booking_date, time_slot, players, \
                               holes, status, notes, created_at, updated_at";

const SLOT_TAKEN: &str = "tee time slot is already booked";

/// Fields for creating a booking.
#[derive(Debug)]
pub struct NewBooking<'a> {
    pub member_id: MemberId,
    pub caddie_id: Option<CaddieId>,
    pub booking_date: NaiveDate,
    pub time_slot: &'a str,
    pub players: i32,
    pub holes: i32,
    pub notes: Option<&'a str>,
}

/// Fields for rescheduling or amending a booking. `None` leaves a field as-is.
#[derive(Debug, Default)]
pub struct BookingUpdate<'a> {
    pub caddie_id: Option<Option<CaddieId>>,
    pub booking_date: Option<NaiveDate>,
    pub time_slot: Option<&'a str>,
    pub players: Option<i32>,
    pub holes: Option<i32>,
    pub notes: Option<&'a str>,
    pub status: Option<BookingStatus>,
}

/// Repository for tee-time bookings.
pub struct BookingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingRepository<'a> {
    /// Create a new booking repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a booking by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List a member's bookings, soonest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Booking>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE member_id = $1
             ORDER BY booking_date, time_slot"
        ))
        .bind(member_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List all bookings, optionally for a single day (the tee sheet view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Booking>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE $1::date IS NULL OR booking_date = $1
             ORDER BY booking_date, time_slot"
        ))
        .bind(date)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// The confirmed slots for a day, for tee-sheet availability.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn taken_slots(&self, date: NaiveDate) -> Result<Vec<String>, RepositoryError> {
        let slots = sqlx::query_scalar::<_, String>(
            "SELECT time_slot FROM bookings
             WHERE booking_date = $1 AND status = 'confirmed'
             ORDER BY time_slot",
        )
        .bind(date)
        .fetch_all(self.pool)
        .await?;

        Ok(slots)
    }

    /// Book a tee time.
    ///
    /// Writes the booking, the loyalty accrual, and the confirmation
    /// notification in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slot is already booked.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, booking: NewBooking<'_>) -> Result<Booking, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "INSERT INTO bookings (member_id, caddie_id, booking_date, time_slot, players, holes, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(booking.member_id)
        .bind(booking.caddie_id)
        .bind(booking.booking_date)
        .bind(booking.time_slot)
        .bind(booking.players)
        .bind(booking.holes)
        .bind(booking.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::on_unique(e, SLOT_TAKEN))?;

        record_points(
            &mut tx,
            booking.member_id,
            BOOKING_LOYALTY_POINTS,
            "Tee time booked",
        )
        .await?;

        insert_notification(
            &mut tx,
            booking.member_id,
            NotificationKind::Booking,
            "Tee time confirmed",
            &format!(
                "Your tee time on {} at {} is confirmed.",
                booking.booking_date, booking.time_slot
            ),
        )
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Amend a booking. `None` fields are left as-is.
    ///
    /// Rescheduling onto a taken slot fails with `Conflict`; the partial
    /// unique index only covers confirmed bookings, so cancelling frees the
    /// slot immediately.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the booking doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new slot is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: BookingId,
        update: BookingUpdate<'_>,
    ) -> Result<Booking, RepositoryError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "UPDATE bookings
             SET caddie_id = CASE WHEN $2 THEN $3 ELSE caddie_id END,
                 booking_date = COALESCE($4, booking_date),
                 time_slot = COALESCE($5, time_slot),
                 players = COALESCE($6, players),
                 holes = COALESCE($7, holes),
                 notes = COALESCE($8, notes),
                 status = COALESCE($9, status),
                 updated_at = now()
             WHERE id = $1
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(id)
        .bind(update.caddie_id.is_some())
        .bind(update.caddie_id.flatten())
        .bind(update.booking_date)
        .bind(update.time_slot)
        .bind(update.players)
        .bind(update.holes)
        .bind(update.notes)
        .bind(update.status)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::on_unique(e, SLOT_TAKEN))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Cancel a booking (soft delete; the slot becomes bookable again).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the booking doesn't exist or
    /// is not in a cancellable status.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn cancel(&self, id: BookingId) -> Result<Booking, RepositoryError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "UPDATE bookings SET status = 'cancelled', updated_at = now()
             WHERE id = $1 AND status = 'confirmed'
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}
