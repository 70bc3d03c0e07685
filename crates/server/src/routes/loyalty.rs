//! Loyalty route handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use fairway_core::{MemberId, MemberTier};

use crate::db::{LoyaltyRepository, MemberRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAdmin, RequireMember};
use crate::models::LoyaltyTransaction;
use crate::state::AppState;

/// The member's loyalty standing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub member_id: MemberId,
    pub loyalty_points: i32,
    pub tier: MemberTier,
}

/// Request body for a manual adjustment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustRequest {
    pub member_id: MemberId,
    pub points: i32,
    pub reason: String,
}

/// `GET /api/loyalty` — own balance and tier.
pub async fn balance(
    State(state): State<AppState>,
    member: RequireMember,
) -> Result<Json<BalanceResponse>> {
    let profile = MemberRepository::new(state.pool())
        .get_by_id(member.member_id)
        .await?
        .ok_or_else(|| AppError::NotFound("member not found".to_owned()))?;

    Ok(Json(BalanceResponse {
        member_id: profile.id,
        loyalty_points: profile.loyalty_points,
        tier: profile.tier,
    }))
}

/// `GET /api/loyalty/transactions` — own ledger, newest first.
pub async fn transactions(
    State(state): State<AppState>,
    member: RequireMember,
) -> Result<Json<Vec<LoyaltyTransaction>>> {
    let ledger = LoyaltyRepository::new(state.pool())
        .transactions(member.member_id)
        .await?;

    Ok(Json(ledger))
}

/// `POST /api/loyalty/adjust` — manual credit or debit (admin).
pub async fn adjust(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(body): Json<AdjustRequest>,
) -> Result<StatusCode> {
    if body.points == 0 {
        return Err(AppError::BadRequest(
            "adjustment must be non-zero".to_owned(),
        ));
    }
    if body.reason.trim().is_empty() {
        return Err(AppError::BadRequest("a reason is required".to_owned()));
    }

    LoyaltyRepository::new(state.pool())
        .adjust(body.member_id, body.points, body.reason.trim())
        .await?;

    tracing::info!(member_id = %body.member_id, points = body.points, "loyalty adjusted");

    Ok(StatusCode::NO_CONTENT)
}
