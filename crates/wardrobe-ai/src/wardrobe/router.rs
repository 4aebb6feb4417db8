use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{ItemCategory, ItemId, NewWardrobeItem};
use super::import::CatalogImporter;
use super::repository::CatalogStore;
use super::service::{WardrobeService, WardrobeServiceError};
use crate::identity::AuthSession;
use crate::storage::{ImageStore, StorageError};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    pub(crate) category: Option<ItemCategory>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddItemRequest {
    pub(crate) item: NewWardrobeItem,
}

/// Router exposing the catalog endpoints for the authenticated account.
pub fn wardrobe_router<C, S>(service: Arc<WardrobeService<C, S>>) -> Router
where
    C: CatalogStore + 'static,
    S: ImageStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/wardrobe",
            get(list_handler::<C, S>).post(add_handler::<C, S>),
        )
        .route("/api/v1/wardrobe/import", post(import_handler::<C, S>))
        .route("/api/v1/wardrobe/:item_id", delete(delete_handler::<C, S>))
        .route(
            "/api/v1/wardrobe/:item_id/refresh-image",
            post(refresh_image_handler::<C, S>),
        )
        .with_state(service)
}

pub(crate) fn wardrobe_error_response(err: WardrobeServiceError) -> Response {
    let status = match &err {
        WardrobeServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        WardrobeServiceError::NotFound => StatusCode::NOT_FOUND,
        WardrobeServiceError::Storage(StorageError::Forbidden) => StatusCode::FORBIDDEN,
        WardrobeServiceError::Catalog(_) | WardrobeServiceError::Storage(_) => {
            error!(error = %err, "wardrobe operation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

pub(crate) async fn list_handler<C, S>(
    State(service): State<Arc<WardrobeService<C, S>>>,
    AuthSession(session): AuthSession,
    Query(query): Query<ListQuery>,
) -> Response
where
    C: CatalogStore + 'static,
    S: ImageStore + 'static,
{
    match service.list(&session, query.category) {
        Ok(items) => (StatusCode::OK, Json(json!({ "items": items }))).into_response(),
        Err(err) => wardrobe_error_response(err),
    }
}

pub(crate) async fn add_handler<C, S>(
    State(service): State<Arc<WardrobeService<C, S>>>,
    AuthSession(session): AuthSession,
    Json(request): Json<AddItemRequest>,
) -> Response
where
    C: CatalogStore + 'static,
    S: ImageStore + 'static,
{
    match service.add(&session, request.item) {
        Ok(item) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "item": item })),
        )
            .into_response(),
        Err(err) => wardrobe_error_response(err),
    }
}

pub(crate) async fn import_handler<C, S>(
    State(service): State<Arc<WardrobeService<C, S>>>,
    AuthSession(session): AuthSession,
    body: String,
) -> Response
where
    C: CatalogStore + 'static,
    S: ImageStore + 'static,
{
    let submissions = match CatalogImporter::from_reader(Cursor::new(body.into_bytes())) {
        Ok(submissions) => submissions,
        Err(err) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": err.to_string() })))
                .into_response()
        }
    };

    match service.import(&session, submissions) {
        Ok(items) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "items": items })),
        )
            .into_response(),
        Err(err) => wardrobe_error_response(err),
    }
}

pub(crate) async fn delete_handler<C, S>(
    State(service): State<Arc<WardrobeService<C, S>>>,
    AuthSession(session): AuthSession,
    Path(item_id): Path<String>,
) -> Response
where
    C: CatalogStore + 'static,
    S: ImageStore + 'static,
{
    match service.delete(&session, &ItemId(item_id)) {
        Ok(true) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Ok(false) => wardrobe_error_response(WardrobeServiceError::NotFound),
        Err(err) => wardrobe_error_response(err),
    }
}

pub(crate) async fn refresh_image_handler<C, S>(
    State(service): State<Arc<WardrobeService<C, S>>>,
    AuthSession(session): AuthSession,
    Path(item_id): Path<String>,
) -> Response
where
    C: CatalogStore + 'static,
    S: ImageStore + 'static,
{
    match service.refresh_image(&session, &ItemId(item_id)) {
        Ok(signed) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "image_url": signed.url,
                "expires_at": signed.expires_at,
            })),
        )
            .into_response(),
        Err(err) => wardrobe_error_response(err),
    }
}
