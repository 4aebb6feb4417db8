use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::debug;

use super::provider::IdentityProvider;
use super::session::Session;

/// Request extension carrying the provider used to validate bearer tokens.
#[derive(Clone)]
pub struct IdentityHandle(pub Arc<dyn IdentityProvider>);

impl IdentityHandle {
    pub fn new<P: IdentityProvider + 'static>(provider: Arc<P>) -> Self {
        Self(provider)
    }
}

/// Extractor yielding the caller's verified [`Session`].
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

pub(crate) fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(identity) = parts.extensions.get::<IdentityHandle>().cloned() else {
            let payload = json!({ "error": "identity provider not configured" });
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response());
        };

        let token = bearer_token(&parts.headers).ok_or_else(unauthorized)?;
        identity.0.verify(token).map(AuthSession).map_err(|err| {
            debug!(error = %err, "rejecting request with invalid credentials");
            unauthorized()
        })
    }
}
