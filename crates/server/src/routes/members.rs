//! Member route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use fairway_core::{MemberId, MemberTier};

use crate::db::MemberRepository;
use crate::db::members::MemberProfileUpdate;
use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAdmin, RequireAuth, RequireStaff};
use crate::models::{CurrentUser, Member};
use crate::state::AppState;

/// Profile update request body. `tier` is admin-only.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// An empty string clears the phone number.
    pub phone: Option<String>,
    pub tier: Option<MemberTier>,
}

fn may_view(current: &CurrentUser, member_id: MemberId) -> bool {
    current.is_staff() || current.member_id == Some(member_id)
}

/// `GET /api/members` — all members (staff view).
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
) -> Result<Json<Vec<Member>>> {
    let members = MemberRepository::new(state.pool()).list_all().await?;
    Ok(Json(members))
}

/// `GET /api/members/{id}` — one member, visible to themselves and staff.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(id): Path<MemberId>,
) -> Result<Json<Member>> {
    if !may_view(&current, id) {
        return Err(AppError::Forbidden(
            "you may only view your own profile".to_owned(),
        ));
    }

    let member = MemberRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("member not found".to_owned()))?;

    Ok(Json(member))
}

/// `PATCH /api/members/{id}` — update a profile.
///
/// Members edit their own name and phone; admins may also change the tier.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(id): Path<MemberId>,
    Json(body): Json<UpdateMemberRequest>,
) -> Result<Json<Member>> {
    if !may_view(&current, id) {
        return Err(AppError::Forbidden(
            "you may only edit your own profile".to_owned(),
        ));
    }
    if body.tier.is_some() && current.role != fairway_core::UserRole::Admin {
        return Err(AppError::Forbidden(
            "only an admin may change a member's tier".to_owned(),
        ));
    }

    let repo = MemberRepository::new(state.pool());

    let mut member = repo
        .update_profile(
            id,
            MemberProfileUpdate {
                first_name: body.first_name.as_deref(),
                last_name: body.last_name.as_deref(),
                phone: body
                    .phone
                    .as_deref()
                    .map(|p| if p.is_empty() { None } else { Some(p) }),
            },
        )
        .await?;

    if let Some(tier) = body.tier {
        member = repo.update_tier(id, tier).await?;
    }

    Ok(Json(member))
}

/// `DELETE /api/members/{id}` — remove a member and their account (admin).
pub async fn remove(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<MemberId>,
) -> Result<StatusCode> {
    MemberRepository::new(state.pool()).delete(id).await?;
    tracing::info!(member_id = %id, "member removed");
    Ok(StatusCode::NO_CONTENT)
}
