//! REST API handlers
//!
//! - `events`: public tracking endpoint
//! - `news`: public article reads
//! - `auth`: admin session lifecycle
//! - `analytics`: session-guarded reporting

pub mod analytics;
pub mod auth;
pub mod events;
pub mod news;

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::auth::guard;
use crate::auth::AdminAccount;

use super::state::AppState;
use super::ApiError;

/// Resolve the request's session cookie to an admin account, or fail with
/// the generic unauthorized error.
pub(crate) fn require_admin(
    state: &Arc<AppState>,
    headers: &HeaderMap,
) -> Result<AdminAccount, ApiError> {
    guard::authorize(headers, &state.sessions, &state.admins).ok_or_else(ApiError::unauthorized)
}
