//! Dining menu route handlers.
//!
//! The public listing is served from the moka cache; every admin write
//! invalidates it.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use fairway_core::{MenuCategory, MenuItemId, Price};

use crate::db::MenuRepository;
use crate::db::menu::NewMenuItem;
use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAdmin, RequireAuth};
use crate::models::MenuItem;
use crate::state::AppState;

/// Menu listing filter.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<MenuCategory>,
    /// Staff view: include unavailable items, bypassing the cache.
    #[serde(default)]
    pub all: bool,
}

/// Request body for adding a menu item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: MenuCategory,
    pub price: Price,
    #[serde(default = "default_available")]
    pub available: bool,
}

/// Request body for updating a menu item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<MenuCategory>,
    pub price: Option<Price>,
    pub available: Option<bool>,
}

const fn default_available() -> bool {
    true
}

fn validate_price(price: Price) -> Result<()> {
    if price.is_negative() {
        return Err(AppError::BadRequest("price must not be negative".to_owned()));
    }
    Ok(())
}

/// `GET /api/menu` — the menu card, optionally one category.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<MenuItem>>> {
    let repo = MenuRepository::new(state.pool());

    if query.all {
        if !current.is_staff() {
            return Err(AppError::Forbidden(
                "only staff may view the full menu".to_owned(),
            ));
        }
        return Ok(Json(repo.list_all().await?));
    }

    if let Some(cached) = state.menu_cache().get(&query.category).await {
        return Ok(Json(cached.as_ref().clone()));
    }

    let items = repo.list_available(query.category).await?;
    state
        .menu_cache()
        .insert(query.category, Arc::new(items.clone()))
        .await;

    Ok(Json(items))
}

/// `POST /api/menu` — add a menu item (admin).
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(body): Json<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItem>)> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }
    validate_price(body.price)?;

    let item = MenuRepository::new(state.pool())
        .create(NewMenuItem {
            name: body.name.trim(),
            description: body.description.as_deref(),
            category: body.category,
            price: body.price,
            available: body.available,
        })
        .await?;

    state.invalidate_menu_cache();

    Ok((StatusCode::CREATED, Json(item)))
}

/// `PATCH /api/menu/{id}` — update a menu item (admin).
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<MenuItemId>,
    Json(body): Json<UpdateMenuItemRequest>,
) -> Result<Json<MenuItem>> {
    if let Some(price) = body.price {
        validate_price(price)?;
    }

    let item = MenuRepository::new(state.pool())
        .update(
            id,
            body.name.as_deref(),
            body.description.as_deref(),
            body.category,
            body.price,
            body.available,
        )
        .await?;

    state.invalidate_menu_cache();

    Ok(Json(item))
}

/// `DELETE /api/menu/{id}` — remove a menu item (admin).
pub async fn remove(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<MenuItemId>,
) -> Result<StatusCode> {
    MenuRepository::new(state.pool()).delete(id).await?;
    state.invalidate_menu_cache();

    Ok(StatusCode::NO_CONTENT)
}
