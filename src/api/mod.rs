//! API module for the HTTP endpoints
//!
//! Provides the public tracking/read endpoints and the session-guarded
//! admin endpoints:
//! - `GET  /health` - Health check
//! - `GET  /api/news` - Published articles, paginated
//! - `GET  /api/news/:slug` - Single published article
//! - `POST /api/events` - Track a view/click/share event
//! - `POST /api/admin/auth/login` - Start an admin session
//! - `POST /api/admin/auth/logout` - Revoke the current session
//! - `GET  /api/admin/auth/me` - Current admin account
//! - `GET  /api/admin/analytics/{overview,timeseries,ranking}` - Reports

pub mod http;
pub mod rest;
pub mod state;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::analytics::ClassifyError;
use crate::store::StoreError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip)]
    status: StatusCode,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.to_string(),
            status,
        }
    }

    pub fn invalid_event_shape(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_EVENT_SHAPE", message)
    }

    pub fn invalid_reference(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_REFERENCE", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// Generic by design: bad credentials and missing/expired/revoked
    /// sessions must be indistinguishable to the caller.
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Unauthorized")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", message)
    }

    /// Persistence failure, already logged server-side; the body never
    /// exposes internals.
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<ClassifyError> for ApiError {
    fn from(e: ClassifyError) -> Self {
        match e {
            ClassifyError::InvalidShape => ApiError::invalid_event_shape(e.to_string()),
            ClassifyError::InvalidReference => ApiError::invalid_reference(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        log::error!("store failure: {}", e);
        ApiError::internal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let err = ApiError::rate_limited("slow down");
        let body = serde_json::to_value(&err).unwrap();
        assert_eq!(body["code"], "RATE_LIMITED");
        assert_eq!(body["error"], "slow down");
        // Status is transport-level, not part of the body.
        assert!(body.get("status").is_none());
    }

    #[test]
    fn test_unauthorized_is_generic() {
        let err = ApiError::unauthorized();
        assert_eq!(err.error, "Unauthorized");
    }
}
