//! Admin session endpoints

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::auth::guard::{clear_session_cookie, session_cookie, session_token, session_ttl};
use crate::auth::token::{hash_token, mint_token};
use crate::auth::AdminAccount;
use crate::api::state::AppState;
use crate::api::ApiError;

use super::require_admin;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Admin identity as returned to the client; never includes the hash.
#[derive(Debug, Serialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

impl From<&AdminAccount> for AdminUser {
    fn from(account: &AdminAccount) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            role: account.role.clone(),
        }
    }
}

/// POST /api/admin/auth/login - Verify credentials and start a session
///
/// The throttle is evaluated before credentials, so a throttled response
/// carries no signal about their correctness. On success the raw token goes
/// to the client in an HttpOnly cookie and only its digest is stored.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if !state.login_limiter.check(addr.ip()) {
        return Err(ApiError::rate_limited(
            "Too many login attempts, please try again later",
        ));
    }

    if body.email.is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("Invalid input"));
    }

    let account = state
        .admins
        .authenticate(&body.email, &body.password)
        .map_err(|_| ApiError::unauthorized())?;

    let token = mint_token();
    let ttl = session_ttl();
    state.sessions.create(account.id, hash_token(&token), ttl)?;

    log::info!("admin {} logged in", account.email);

    Ok((
        [(header::SET_COOKIE, session_cookie(&token, ttl.num_seconds()))],
        Json(json!({ "success": true, "user": AdminUser::from(account) })),
    )
        .into_response())
}

/// POST /api/admin/auth/logout - Revoke the presented session
///
/// Idempotent: logging out twice, or with no/unknown cookie, all succeed.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if let Some(token) = session_token(&headers) {
        state.sessions.revoke(&hash_token(&token))?;
    }

    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(json!({ "success": true })),
    )
        .into_response())
}

/// GET /api/admin/auth/me - Identify the current session's admin
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let account = require_admin(&state, &headers)?;
    Ok(Json(json!({ "user": AdminUser::from(&account) })))
}
