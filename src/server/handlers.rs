//! Request handlers for the search API.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::error::SearchError;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    query: String,
    /// Comma-separated retailer identifiers.
    #[serde(default)]
    sources: String,
}

/// `GET /api/search?query=coffee+maker&sources=Walmart,Amazon`
pub async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let sources: Vec<String> = params
        .sources
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    match state.service.search(&params.query, &sources).await {
        Ok(products) => Json(products).into_response(),
        Err(SearchError::Validation(message)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": message })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}
