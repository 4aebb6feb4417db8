use crate::config::ConfigError;
use crate::events::EventError;
use crate::outfits::OutfitError;
use crate::telemetry::TelemetryError;
use crate::wardrobe::{CatalogError, CatalogImportError, WardrobeServiceError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Json(serde_json::Error),
    Import(CatalogImportError),
    Catalog(CatalogError),
    Wardrobe(WardrobeServiceError),
    Events(EventError),
    Outfit(OutfitError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Json(err) => write!(f, "invalid JSON: {}", err),
            AppError::Import(err) => write!(f, "catalog import error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Wardrobe(err) => write!(f, "wardrobe error: {}", err),
            AppError::Events(err) => write!(f, "event error: {}", err),
            AppError::Outfit(err) => write!(f, "outfit error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Wardrobe(err) => Some(err),
            AppError::Events(err) => Some(err),
            AppError::Outfit(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Json(_) | AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Outfit(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Wardrobe(WardrobeServiceError::Validation(_))
            | AppError::Events(EventError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Wardrobe(WardrobeServiceError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Catalog(_)
            | AppError::Wardrobe(_)
            | AppError::Events(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<CatalogImportError> for AppError {
    fn from(value: CatalogImportError) -> Self {
        Self::Import(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<WardrobeServiceError> for AppError {
    fn from(value: WardrobeServiceError) -> Self {
        Self::Wardrobe(value)
    }
}

impl From<EventError> for AppError {
    fn from(value: EventError) -> Self {
        Self::Events(value)
    }
}

impl From<OutfitError> for AppError {
    fn from(value: OutfitError) -> Self {
        Self::Outfit(value)
    }
}
