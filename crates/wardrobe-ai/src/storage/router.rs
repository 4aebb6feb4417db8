use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::{ImageStore, StorageError};

#[derive(Debug, Deserialize)]
pub(crate) struct SignedQuery {
    pub(crate) expires: i64,
    pub(crate) signature: String,
}

/// Serves stored images to holders of a valid signed link.
pub fn image_router<S>(store: Arc<S>) -> Router
where
    S: ImageStore + 'static,
{
    Router::new()
        .route("/api/v1/images/*file_name", get(image_handler::<S>))
        .with_state(store)
}

pub(crate) async fn image_handler<S>(
    State(store): State<Arc<S>>,
    Path(file_name): Path<String>,
    Query(query): Query<SignedQuery>,
) -> Response
where
    S: ImageStore + 'static,
{
    match store.open(&file_name, query.expires, &query.signature) {
        Ok(blob) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, blob.content_type)],
            blob.bytes,
        )
            .into_response(),
        Err(err @ (StorageError::Expired | StorageError::InvalidSignature)) => {
            (StatusCode::FORBIDDEN, Json(json!({ "error": err.to_string() }))).into_response()
        }
        Err(StorageError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Item or image not found" })),
        )
            .into_response(),
        Err(err) => {
            warn!(%file_name, error = %err, "image lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}
