//! Public article read endpoints

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::state::AppState;
use crate::api::ApiError;

/// Query parameters for listing published articles
#[derive(Debug, Deserialize)]
pub struct ListNewsParams {
    #[serde(default = "default_page")]
    pub page: usize,
    /// Maximum number of articles per page (capped at 50)
    #[serde(rename = "pageSize", default = "default_page_size")]
    pub page_size: usize,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    12
}

/// GET /api/news - Published articles, newest first
pub async fn list_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListNewsParams>,
) -> Json<Value> {
    let page = params.page.max(1);
    let page_size = params.page_size.min(50);
    let (data, _total) = state.articles.published(page, page_size);

    Json(json!({
        "data": data,
        "page": page,
        "pageSize": page_size,
    }))
}

/// GET /api/news/:slug - Single published article
pub async fn get_news_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match state
        .articles
        .find_by_slug(&slug)
        .filter(|article| article.is_published())
    {
        Some(article) => Ok(Json(json!({ "data": article }))),
        None => Err(ApiError::not_found("Article not found")),
    }
}
