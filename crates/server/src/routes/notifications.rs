//! Notification route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use fairway_core::NotificationId;

use crate::db::NotificationRepository;
use crate::error::Result;
use crate::middleware::auth::RequireMember;
use crate::models::Notification;
use crate::state::AppState;

/// Notification listing filter.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub unread: bool,
}

/// Response for a bulk mark-read.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub marked: u64,
}

/// `GET /api/notifications` — own notifications, newest first.
pub async fn list(
    State(state): State<AppState>,
    member: RequireMember,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Notification>>> {
    let notifications = NotificationRepository::new(state.pool())
        .list(member.member_id, query.unread)
        .await?;

    Ok(Json(notifications))
}

/// `POST /api/notifications/{id}/read` — mark one notification read.
pub async fn mark_read(
    State(state): State<AppState>,
    member: RequireMember,
    Path(id): Path<NotificationId>,
) -> Result<Json<Notification>> {
    let notification = NotificationRepository::new(state.pool())
        .mark_read(id, member.member_id)
        .await?;

    Ok(Json(notification))
}

/// `POST /api/notifications/read-all` — mark everything read.
pub async fn mark_all_read(
    State(state): State<AppState>,
    member: RequireMember,
) -> Result<Json<MarkAllReadResponse>> {
    let marked = NotificationRepository::new(state.pool())
        .mark_all_read(member.member_id)
        .await?;

    Ok(Json(MarkAllReadResponse { marked }))
}
