//! Tee-time booking route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fairway_core::{BookingId, BookingStatus, CaddieId};

use crate::db::{BookingRepository, CaddieRepository};
use crate::db::bookings::{BookingUpdate, NewBooking};
use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAuth, RequireMember};
use crate::models::{Booking, CurrentUser};
use crate::services::tee_sheet;
use crate::state::AppState;

/// Tee sheet query.
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

/// Booking listing filter (staff only).
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date: Option<NaiveDate>,
}

/// Request body for booking a tee time.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub booking_date: NaiveDate,
    pub time_slot: String,
    pub players: i32,
    pub holes: i32,
    pub caddie_id: Option<CaddieId>,
    pub notes: Option<String>,
}

/// Request body for amending a booking.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub booking_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub players: Option<i32>,
    pub holes: Option<i32>,
    /// Present-and-null detaches the caddie; absent leaves it unchanged.
    #[serde(
        default,
        deserialize_with = "crate::routes::bookings::deserialize_nullable_caddie"
    )]
    pub caddie_id: Option<Option<CaddieId>>,
    pub notes: Option<String>,
    pub status: Option<BookingStatus>,
}

/// The tee sheet for one day.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeeSheetResponse {
    pub date: NaiveDate,
    pub slots: Vec<tee_sheet::TeeSlot>,
}

pub(crate) fn deserialize_nullable_caddie<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<CaddieId>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    // Field present: null clears, a value assigns
    Option::<CaddieId>::deserialize(deserializer).map(Some)
}

fn validate_booking_shape(
    players: Option<i32>,
    holes: Option<i32>,
    time_slot: Option<&str>,
) -> Result<()> {
    if let Some(players) = players
        && !(1..=4).contains(&players)
    {
        return Err(AppError::BadRequest(
            "players must be between 1 and 4".to_owned(),
        ));
    }
    if let Some(holes) = holes
        && holes != 9
        && holes != 18
    {
        return Err(AppError::BadRequest("holes must be 9 or 18".to_owned()));
    }
    if let Some(slot) = time_slot
        && !tee_sheet::is_valid_slot(slot)
    {
        return Err(AppError::Database(crate::db::RepositoryError::Rejected(
            "time slot is not on the tee sheet".to_owned(),
        )));
    }
    Ok(())
}

async fn check_caddie_bookable(state: &AppState, caddie_id: CaddieId) -> Result<()> {
    let caddie = CaddieRepository::new(state.pool())
        .get_by_id(caddie_id)
        .await?
        .ok_or_else(|| AppError::NotFound("caddie not found".to_owned()))?;

    if !caddie.available {
        return Err(AppError::Database(crate::db::RepositoryError::Rejected(
            "caddie is not available".to_owned(),
        )));
    }

    Ok(())
}

fn owns_booking(current: &CurrentUser, booking: &Booking) -> bool {
    current.is_staff() || current.member_id == Some(booking.member_id)
}

/// `GET /api/bookings/slots?date=` — the tee sheet for a day.
pub async fn slots(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<TeeSheetResponse>> {
    let taken = BookingRepository::new(state.pool())
        .taken_slots(query.date)
        .await?;

    Ok(Json(TeeSheetResponse {
        date: query.date,
        slots: tee_sheet::sheet(&taken),
    }))
}

/// `GET /api/bookings` — own bookings; staff see everyone's (`?date=`).
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Booking>>> {
    let repo = BookingRepository::new(state.pool());

    let bookings = if current.is_staff() {
        repo.list_all(query.date).await?
    } else {
        let member_id = current
            .member_id
            .ok_or_else(|| AppError::Forbidden("no member profile".to_owned()))?;
        repo.list_for_member(member_id).await?
    };

    Ok(Json(bookings))
}

/// `GET /api/bookings/{id}` — one booking, visible to its owner and staff.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(id): Path<BookingId>,
) -> Result<Json<Booking>> {
    let booking = BookingRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("booking not found".to_owned()))?;

    if !owns_booking(&current, &booking) {
        return Err(AppError::Forbidden(
            "you may only view your own bookings".to_owned(),
        ));
    }

    Ok(Json(booking))
}

/// `POST /api/bookings` — book a tee time.
pub async fn create(
    State(state): State<AppState>,
    member: RequireMember,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>)> {
    validate_booking_shape(Some(body.players), Some(body.holes), Some(&body.time_slot))?;

    if let Some(caddie_id) = body.caddie_id {
        check_caddie_bookable(&state, caddie_id).await?;
    }

    let booking = BookingRepository::new(state.pool())
        .create(NewBooking {
            member_id: member.member_id,
            caddie_id: body.caddie_id,
            booking_date: body.booking_date,
            time_slot: &body.time_slot,
            players: body.players,
            holes: body.holes,
            notes: body.notes.as_deref(),
        })
        .await?;

    tracing::info!(booking_id = %booking.id, "tee time booked");

    Ok((StatusCode::CREATED, Json(booking)))
}

/// `PATCH /api/bookings/{id}` — amend or reschedule a booking.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(id): Path<BookingId>,
    Json(body): Json<UpdateBookingRequest>,
) -> Result<Json<Booking>> {
    validate_booking_shape(body.players, body.holes, body.time_slot.as_deref())?;

    let repo = BookingRepository::new(state.pool());

    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("booking not found".to_owned()))?;
    if !owns_booking(&current, &existing) {
        return Err(AppError::Forbidden(
            "you may only amend your own bookings".to_owned(),
        ));
    }

    if let Some(Some(caddie_id)) = body.caddie_id {
        check_caddie_bookable(&state, caddie_id).await?;
    }

    let booking = repo
        .update(
            id,
            BookingUpdate {
                caddie_id: body.caddie_id,
                booking_date: body.booking_date,
                time_slot: body.time_slot.as_deref(),
                players: body.players,
                holes: body.holes,
                notes: body.notes.as_deref(),
                status: body.status,
            },
        )
        .await?;

    Ok(Json(booking))
}

/// `DELETE /api/bookings/{id}` — cancel a booking.
pub async fn cancel(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(id): Path<BookingId>,
) -> Result<Json<Booking>> {
    let repo = BookingRepository::new(state.pool());

    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("booking not found".to_owned()))?;
    if !owns_booking(&current, &existing) {
        return Err(AppError::Forbidden(
            "you may only cancel your own bookings".to_owned(),
        ));
    }

    let booking = repo.cancel(id).await?;
    tracing::info!(booking_id = %id, "booking cancelled");

    Ok(Json(booking))
}
