//! Caddie route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use fairway_core::CaddieId;

use crate::db::CaddieRepository;
use crate::db::caddies::NewCaddie;
use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAdmin, RequireAuth};
use crate::models::Caddie;
use crate::state::AppState;

/// Roster listing filter.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub available: bool,
}

/// Request body for creating a caddie.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaddieRequest {
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

/// Request body for updating a caddie.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaddieRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub available: Option<bool>,
}

const fn default_available() -> bool {
    true
}

/// `GET /api/caddies` — the roster, optionally only available caddies.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Caddie>>> {
    let caddies = CaddieRepository::new(state.pool())
        .list(query.available)
        .await?;
    Ok(Json(caddies))
}

/// `GET /api/caddies/{id}` — one roster entry.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Path(id): Path<CaddieId>,
) -> Result<Json<Caddie>> {
    let caddie = CaddieRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("caddie not found".to_owned()))?;
    Ok(Json(caddie))
}

/// `POST /api/caddies` — add a caddie to the roster (admin).
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(body): Json<CreateCaddieRequest>,
) -> Result<(StatusCode, Json<Caddie>)> {
    if body.first_name.trim().is_empty() || body.last_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "first and last name are required".to_owned(),
        ));
    }

    let caddie = CaddieRepository::new(state.pool())
        .create(NewCaddie {
            first_name: body.first_name.trim(),
            last_name: body.last_name.trim(),
            bio: body.bio.as_deref(),
            available: body.available,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(caddie)))
}

/// `PATCH /api/caddies/{id}` — update a roster entry (admin).
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<CaddieId>,
    Json(body): Json<UpdateCaddieRequest>,
) -> Result<Json<Caddie>> {
    let caddie = CaddieRepository::new(state.pool())
        .update(
            id,
            body.first_name.as_deref(),
            body.last_name.as_deref(),
            body.bio.as_deref(),
            body.available,
        )
        .await?;

    Ok(Json(caddie))
}

/// `DELETE /api/caddies/{id}` — remove a caddie from the roster (admin).
pub async fn remove(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<CaddieId>,
) -> Result<StatusCode> {
    CaddieRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
