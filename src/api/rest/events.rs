//! Public tracking endpoint

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::Json;
use serde_json::{json, Value};

use crate::analytics::{classify, TrackEvent};
use crate::api::state::AppState;
use crate::api::ApiError;

/// POST /api/events - Count a view/click/share event
///
/// Validation happens before any store write: a malformed event causes zero
/// counter mutation. A successful call creates-or-increments exactly one
/// counter row.
pub async fn track_event(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    if !state.event_limiter.check(addr.ip()) {
        return Err(ApiError::rate_limited("Too many events, slow down"));
    }

    let event: TrackEvent = serde_json::from_value(body)
        .map_err(|_| ApiError::invalid_event_shape("malformed tracking event"))?;

    let update = classify(&event, &state.articles)?;
    state.counters.record(update)?;

    Ok(Json(json!({ "success": true })))
}
