use super::service::QueryService;
use super::types::{CorrectParams, ErrorResponse, SearchRequest, SuggestParams};
use crate::error::QueryError;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub const ENDPOINT_SEARCH: &str = "/api/search";
pub const ENDPOINT_SUGGEST: &str = "/api/suggest";
pub const ENDPOINT_CORRECT: &str = "/api/correct";
pub const ENDPOINT_HEALTH: &str = "/health";

pub fn router(service: Arc<QueryService>) -> Router {
    Router::new()
        .route(ENDPOINT_SEARCH, post(handle_search))
        .route(ENDPOINT_SUGGEST, get(handle_suggest))
        .route(ENDPOINT_CORRECT, get(handle_correct))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(service))
}

pub async fn handle_search(
    Extension(service): Extension<Arc<QueryService>>,
    Json(req): Json<SearchRequest>,
) -> Response {
    match service.search(req).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            let status = match e {
                QueryError::BackendUnavailable(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

pub async fn handle_suggest(
    Extension(service): Extension<Arc<QueryService>>,
    Query(params): Query<SuggestParams>,
) -> Json<Vec<String>> {
    Json(service.suggest_prefix(&params.prefix, params.limit).await)
}

pub async fn handle_correct(
    Extension(service): Extension<Arc<QueryService>>,
    Query(params): Query<CorrectParams>,
) -> Json<Option<String>> {
    Json(service.correct_query(&params.q))
}

pub async fn handle_health() -> &'static str {
    "ok"
}
