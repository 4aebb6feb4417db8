use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{EventId, NewEvent};
use super::repository::EventStore;
use super::service::{EventError, EventService, DEFAULT_UPCOMING_LIMIT};
use crate::identity::AuthSession;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DateQuery {
    #[serde(default)]
    pub(crate) date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpcomingQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddEventRequest {
    pub(crate) event: NewEvent,
}

pub fn event_router<E>(service: Arc<EventService<E>>) -> Router
where
    E: EventStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/events",
            get(list_handler::<E>).post(add_handler::<E>),
        )
        .route("/api/v1/events/upcoming", get(upcoming_handler::<E>))
        .route("/api/v1/events/:event_id", delete(delete_handler::<E>))
        .with_state(service)
}

pub(crate) fn event_error_response(err: EventError) -> Response {
    let status = match &err {
        EventError::Validation(_) => StatusCode::BAD_REQUEST,
        EventError::Store(_) => {
            error!(error = %err, "event operation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

pub(crate) async fn list_handler<E>(
    State(service): State<Arc<EventService<E>>>,
    AuthSession(session): AuthSession,
    Query(query): Query<DateQuery>,
) -> Response
where
    E: EventStore + 'static,
{
    let events = match query.date {
        Some(date) => service.on_date(&session, date),
        None => service.list(&session),
    };
    match events {
        Ok(events) => (StatusCode::OK, Json(json!({ "events": events }))).into_response(),
        Err(err) => event_error_response(err),
    }
}

pub(crate) async fn add_handler<E>(
    State(service): State<Arc<EventService<E>>>,
    AuthSession(session): AuthSession,
    Json(request): Json<AddEventRequest>,
) -> Response
where
    E: EventStore + 'static,
{
    match service.add(&session, request.event) {
        Ok(event) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "event": event })),
        )
            .into_response(),
        Err(err) => event_error_response(err),
    }
}

pub(crate) async fn upcoming_handler<E>(
    State(service): State<Arc<EventService<E>>>,
    AuthSession(session): AuthSession,
    Query(query): Query<UpcomingQuery>,
) -> Response
where
    E: EventStore + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT);
    match service.upcoming(&session, Utc::now(), limit) {
        Ok(events) => (StatusCode::OK, Json(json!({ "events": events }))).into_response(),
        Err(err) => event_error_response(err),
    }
}

pub(crate) async fn delete_handler<E>(
    State(service): State<Arc<EventService<E>>>,
    AuthSession(session): AuthSession,
    Path(event_id): Path<String>,
) -> Response
where
    E: EventStore + 'static,
{
    match service.delete(&session, &EventId(event_id)) {
        Ok(true) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Event not found" })),
        )
            .into_response(),
        Err(err) => event_error_response(err),
    }
}
