//! Admin reporting endpoints
//!
//! Thin session-guarded wrappers over the reporting engine. Out-of-range
//! `period`/`metric` values fall back to their defaults instead of erroring,
//! so dashboards never break on a stale query string.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::analytics::report;
use crate::analytics::{OverviewReport, RankingReport, TimeseriesReport};
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::types::{Metric, Period};

use super::require_admin;

#[derive(Debug, Deserialize)]
pub struct ReportParams {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ReportParams {
    fn period(&self) -> Period {
        Period::parse(self.period.as_deref().unwrap_or(""))
    }

    fn metric(&self) -> Metric {
        Metric::parse(self.metric.as_deref().unwrap_or(""))
    }
}

/// GET /api/admin/analytics/overview - Window totals across all keys
pub async fn get_overview(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ReportParams>,
) -> Result<Json<OverviewReport>, ApiError> {
    require_admin(&state, &headers)?;

    Ok(Json(report::overview(
        &state.counters,
        params.period(),
        state.clock.today(),
    )))
}

/// GET /api/admin/analytics/timeseries - Per-day series with trend
pub async fn get_timeseries(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ReportParams>,
) -> Result<Json<TimeseriesReport>, ApiError> {
    require_admin(&state, &headers)?;

    Ok(Json(report::timeseries(
        &state.counters,
        params.period(),
        params.metric(),
        state.clock.today(),
    )))
}

/// GET /api/admin/analytics/ranking - Top-N articles (or tags, for clicks)
pub async fn get_ranking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ReportParams>,
) -> Result<Json<RankingReport>, ApiError> {
    require_admin(&state, &headers)?;

    Ok(Json(report::ranking(
        &state.counters,
        &state.articles,
        params.period(),
        params.metric(),
        params.limit,
        state.clock.today(),
    )))
}
