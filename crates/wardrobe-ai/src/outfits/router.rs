use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use super::context::OutfitContext;
use super::generator::{GeneratedOutfit, OutfitError, OutfitGenerator};
use super::local::recommend_local;
use crate::identity::AuthSession;
use crate::shopping::{shopping_links, ShoppingLinks};
use crate::wardrobe::{CatalogError, CatalogStore, ItemId};

/// Generation runs against a fresh snapshot of the caller's catalog.
pub struct OutfitService<C> {
    catalog: Arc<C>,
    generator: OutfitGenerator,
}

impl<C> OutfitService<C>
where
    C: CatalogStore + 'static,
{
    pub fn new(catalog: Arc<C>, generator: OutfitGenerator) -> Self {
        Self { catalog, generator }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ItemLinks {
    pub(crate) item_id: ItemId,
    pub(crate) links: ShoppingLinks,
}

#[derive(Debug, Serialize)]
pub(crate) struct OutfitResponse {
    pub(crate) outfit: GeneratedOutfit,
    pub(crate) shopping_links: Vec<ItemLinks>,
}

pub fn outfit_router<C>(service: Arc<OutfitService<C>>) -> Router
where
    C: CatalogStore + 'static,
{
    Router::new()
        .route("/api/v1/outfits/generate", post(generate_handler::<C>))
        .route("/api/v1/outfits/recommend", post(recommend_handler::<C>))
        .with_state(service)
}

pub(crate) fn outfit_error_response(err: OutfitError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}

fn catalog_error_response(err: CatalogError) -> Response {
    error!(error = %err, "failed to load catalog for outfit suggestions");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}

pub(crate) async fn generate_handler<C>(
    State(service): State<Arc<OutfitService<C>>>,
    AuthSession(session): AuthSession,
    Json(context): Json<OutfitContext>,
) -> Response
where
    C: CatalogStore + 'static,
{
    let catalog = match service.catalog.list(session.user_id()) {
        Ok(items) => items,
        Err(err) => return catalog_error_response(err),
    };

    let outfit = match service.generator.generate(&catalog, &context) {
        Ok(outfit) => outfit,
        Err(err) => return outfit_error_response(err),
    };
    info!(
        user_id = %session.user_id(),
        selected = outfit.items.len(),
        match_percentage = outfit.match_percentage,
        "outfit generated"
    );

    let shopping_links = outfit
        .items
        .iter()
        .map(|item| ItemLinks {
            item_id: item.id.clone(),
            links: shopping_links(&item.name, &item.color),
        })
        .collect();

    (
        StatusCode::OK,
        Json(OutfitResponse {
            outfit,
            shopping_links,
        }),
    )
        .into_response()
}

pub(crate) async fn recommend_handler<C>(
    State(service): State<Arc<OutfitService<C>>>,
    AuthSession(session): AuthSession,
    Json(context): Json<OutfitContext>,
) -> Response
where
    C: CatalogStore + 'static,
{
    let catalog = match service.catalog.list(session.user_id()) {
        Ok(items) => items,
        Err(err) => return catalog_error_response(err),
    };

    let items = recommend_local(&catalog, &context);
    info!(user_id = %session.user_id(), picked = items.len(), "local recommendation served");
    (StatusCode::OK, Json(json!({ "items": items }))).into_response()
}
