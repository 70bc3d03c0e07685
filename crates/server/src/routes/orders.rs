//! Dining order route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use fairway_core::{MenuItemId, OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::db::orders::{NewOrder, NewOrderLine};
use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAuth, RequireMember, RequireStaff};
use crate::models::{CurrentUser, Order};
use crate::state::AppState;

/// Order listing filter (staff only).
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
}

/// One requested line of an order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub menu_item_id: MenuItemId,
    pub quantity: i32,
}

/// Request body for placing an order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub location: String,
    pub notes: Option<String>,
    pub items: Vec<OrderLineRequest>,
}

/// Request body for a kitchen status change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

fn owns_order(current: &CurrentUser, order: &Order) -> bool {
    current.is_staff() || current.member_id == Some(order.member_id)
}

/// `GET /api/orders` — own orders; staff see everyone's (`?status=`).
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.pool());

    let orders = if current.is_staff() {
        repo.list_all(query.status).await?
    } else {
        let member_id = current
            .member_id
            .ok_or_else(|| AppError::Forbidden("no member profile".to_owned()))?;
        repo.list_for_member(member_id).await?
    };

    Ok(Json(orders))
}

/// `GET /api/orders/{id}` — one order with its lines.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("order not found".to_owned()))?;

    if !owns_order(&current, &order) {
        return Err(AppError::Forbidden(
            "you may only view your own orders".to_owned(),
        ));
    }

    Ok(Json(order))
}

/// `POST /api/orders` — place an order.
pub async fn create(
    State(state): State<AppState>,
    member: RequireMember,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    if body.location.trim().is_empty() {
        return Err(AppError::BadRequest(
            "a delivery location is required".to_owned(),
        ));
    }

    let lines = body
        .items
        .iter()
        .map(|line| NewOrderLine {
            menu_item_id: line.menu_item_id,
            quantity: line.quantity,
        })
        .collect();

    let order = OrderRepository::new(state.pool())
        .create(NewOrder {
            member_id: member.member_id,
            location: body.location.trim(),
            notes: body.notes.as_deref(),
            lines,
        })
        .await?;

    tracing::info!(order_id = %order.id, total = %order.total, "order placed");

    Ok((StatusCode::CREATED, Json(order)))
}

/// `PATCH /api/orders/{id}/status` — advance the kitchen status (staff).
pub async fn update_status(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<OrderId>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .update_status(id, body.status)
        .await?;

    tracing::info!(order_id = %id, status = %body.status, "order status changed");

    Ok(Json(order))
}
