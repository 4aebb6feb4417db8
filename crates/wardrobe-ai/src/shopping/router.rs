use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::links::search_link;
use super::recommendations::recommend;
use crate::identity::AuthSession;
use crate::wardrobe::CatalogStore;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    pub(crate) q: String,
}

/// Recommendation routes read the caller's catalog directly.
pub fn shopping_router<C>(catalog: Arc<C>) -> Router
where
    C: CatalogStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/shopping/recommendations",
            get(recommendations_handler::<C>),
        )
        .route("/api/v1/shopping/search", get(search_handler))
        .with_state(catalog)
}

pub(crate) async fn recommendations_handler<C>(
    State(catalog): State<Arc<C>>,
    AuthSession(session): AuthSession,
) -> Response
where
    C: CatalogStore + 'static,
{
    match catalog.list(session.user_id()) {
        Ok(items) => (StatusCode::OK, Json(recommend(&items))).into_response(),
        Err(err) => {
            error!(error = %err, "failed to load catalog for recommendations");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

pub(crate) async fn search_handler(Query(query): Query<SearchQuery>) -> Response {
    match search_link(&query.q) {
        Some(url) => (StatusCode::OK, Json(json!({ "url": url }))).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Please enter a search query" })),
        )
            .into_response(),
    }
}
