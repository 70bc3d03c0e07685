//! Authentication route handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::db::MemberRepository;
use crate::db::users::{NewMemberProfile, UserRepository};
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::auth::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{Member, User};
use crate::services::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The logged-in identity payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: User,
    pub member: Option<Member>,
}

/// `POST /api/auth/register` — create a member account and log in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterRequest>,
) -> Result<Response> {
    if body.first_name.trim().is_empty() || body.last_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "first and last name are required".to_owned(),
        ));
    }

    let auth = AuthService::new(state.pool());
    let (user, member) = auth
        .register_member(
            &body.email,
            &body.password,
            NewMemberProfile {
                first_name: body.first_name.trim(),
                last_name: body.last_name.trim(),
                phone: body.phone.as_deref(),
            },
        )
        .await?;

    let identity = AuthService::session_identity(&user, Some(&member));
    set_current_user(&session, &identity)
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;
    set_sentry_user(&user.id, Some(user.email.as_str()));

    tracing::info!(user_id = %user.id, "member registered");

    let payload = SessionResponse {
        user,
        member: Some(member),
    };
    Ok((StatusCode::CREATED, Json(payload)).into_response())
}

/// `POST /api/auth/login` — authenticate and start a session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let auth = AuthService::new(state.pool());
    let (user, member) = auth.login(&body.email, &body.password).await?;

    // Drop any prior identity before storing the new one
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("failed to cycle session: {e}")))?;

    let identity = AuthService::session_identity(&user, member.as_ref());
    set_current_user(&session, &identity)
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;
    set_sentry_user(&user.id, Some(user.email.as_str()));

    tracing::info!(user_id = %user.id, "logged in");

    Ok(Json(SessionResponse { user, member }))
}

/// `POST /api/auth/logout` — clear the session.
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me` — the current user and member profile.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<SessionResponse>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(current.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("account no longer exists".to_owned()))?;

    let member = match current.member_id {
        Some(member_id) => MemberRepository::new(state.pool()).get_by_id(member_id).await?,
        None => None,
    };

    Ok(Json(SessionResponse { user, member }))
}
