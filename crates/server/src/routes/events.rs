//! Club event route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use fairway_core::{EventId, EventStatus};

use crate::db::EventRepository;
use crate::db::events::NewEvent;
use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAdmin, RequireAuth, RequireMember, RequireStaff};
use crate::models::{Event, EventRegistration};
use crate::services::tee_sheet;
use crate::state::AppState;

/// Event listing filter.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Staff view: include past and cancelled events.
    #[serde(default)]
    pub all: bool,
}

/// Request body for scheduling an event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub capacity: Option<i32>,
}

/// Request body for updating an event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub capacity: Option<i32>,
    pub status: Option<EventStatus>,
}

fn validate_event(start_time: Option<&str>, capacity: Option<i32>) -> Result<()> {
    if let Some(time) = start_time
        && tee_sheet::parse_clock(time).is_none()
    {
        return Err(AppError::BadRequest(
            "start time must be \"HH:MM\"".to_owned(),
        ));
    }
    if let Some(capacity) = capacity
        && capacity < 1
    {
        return Err(AppError::BadRequest(
            "capacity must be at least 1".to_owned(),
        ));
    }
    Ok(())
}

/// `GET /api/events` — upcoming events; staff may request everything.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Event>>> {
    if query.all && !current.is_staff() {
        return Err(AppError::Forbidden(
            "only staff may list past events".to_owned(),
        ));
    }

    let today = Utc::now().date_naive();
    let events = EventRepository::new(state.pool())
        .list(!query.all, today)
        .await?;

    Ok(Json(events))
}

/// `GET /api/events/{id}` — one event.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Path(id): Path<EventId>,
) -> Result<Json<Event>> {
    let event = EventRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("event not found".to_owned()))?;
    Ok(Json(event))
}

/// `POST /api/events` — schedule an event (admin).
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(body): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>)> {
    if body.title.trim().is_empty() {
        return Err(AppError::BadRequest("title is required".to_owned()));
    }
    validate_event(Some(&body.start_time), body.capacity)?;

    let event = EventRepository::new(state.pool())
        .create(NewEvent {
            title: body.title.trim(),
            description: body.description.as_deref(),
            event_date: body.event_date,
            start_time: &body.start_time,
            capacity: body.capacity,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// `PATCH /api/events/{id}` — update an event (admin).
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<EventId>,
    Json(body): Json<UpdateEventRequest>,
) -> Result<Json<Event>> {
    validate_event(body.start_time.as_deref(), body.capacity)?;

    let event = EventRepository::new(state.pool())
        .update(
            id,
            body.title.as_deref(),
            body.description.as_deref(),
            body.event_date,
            body.start_time.as_deref(),
            body.capacity.map(Some),
            body.status,
        )
        .await?;

    Ok(Json(event))
}

/// `DELETE /api/events/{id}` — cancel an event and notify registrants (admin).
pub async fn cancel(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<EventId>,
) -> Result<Json<Event>> {
    let event = EventRepository::new(state.pool()).cancel(id).await?;
    tracing::info!(event_id = %id, "event cancelled");
    Ok(Json(event))
}

/// `POST /api/events/{id}/register` — register for an event.
pub async fn register(
    State(state): State<AppState>,
    member: RequireMember,
    Path(id): Path<EventId>,
) -> Result<(StatusCode, Json<EventRegistration>)> {
    let registration = EventRepository::new(state.pool())
        .register(id, member.member_id)
        .await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

/// `DELETE /api/events/{id}/register` — withdraw a registration.
pub async fn unregister(
    State(state): State<AppState>,
    member: RequireMember,
    Path(id): Path<EventId>,
) -> Result<StatusCode> {
    EventRepository::new(state.pool())
        .unregister(id, member.member_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/events/{id}/registrations` — who is registered (staff).
pub async fn registrations(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<EventId>,
) -> Result<Json<Vec<EventRegistration>>> {
    let repo = EventRepository::new(state.pool());

    if repo.get_by_id(id).await?.is_none() {
        return Err(AppError::NotFound("event not found".to_owned()));
    }

    Ok(Json(repo.registrations(id).await?))
}
