//! HTTP server setup with Axum

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use super::rest::{analytics, auth, events, news};
use super::state::AppState;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.frontend_origin.as_deref());

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Public endpoints
        .route("/api/news", get(news::list_news))
        .route("/api/news/:slug", get(news::get_news_by_slug))
        .route("/api/events", post(events::track_event))
        // Admin endpoints (session-guarded in the handlers)
        .route("/api/admin/auth/login", post(auth::login))
        .route("/api/admin/auth/logout", post(auth::logout))
        .route("/api/admin/auth/me", get(auth::me))
        .route("/api/admin/analytics/overview", get(analytics::get_overview))
        .route(
            "/api/admin/analytics/timeseries",
            get(analytics::get_timeseries),
        )
        .route("/api/admin/analytics/ranking", get(analytics::get_ranking))
        .layer(cors)
        .with_state(state)
}

/// Credentialed CORS for the configured frontend origin; a permissive
/// policy for development when no origin is configured. Cookies only flow
/// in the credentialed case.
fn cors_layer(frontend_origin: Option<&str>) -> CorsLayer {
    match frontend_origin.and_then(|origin| origin.parse::<HeaderValue>().ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
