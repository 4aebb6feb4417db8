use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{error, info};

use super::extract::AuthSession;
use super::provider::{IdentityError, IdentityProvider};
use super::session::{LoginRequest, SignupRequest};

/// Account registration, login, and session lookup endpoints.
pub fn identity_router<P>(provider: Arc<P>) -> Router
where
    P: IdentityProvider + 'static,
{
    Router::new()
        .route("/api/v1/auth/signup", post(signup_handler::<P>))
        .route("/api/v1/auth/login", post(login_handler::<P>))
        .route("/api/v1/auth/session", get(session_handler))
        .with_state(provider)
}

fn identity_error_response(err: IdentityError) -> Response {
    let status = match err {
        IdentityError::MissingFields
        | IdentityError::WeakPassword(_)
        | IdentityError::DuplicateEmail => StatusCode::BAD_REQUEST,
        IdentityError::InvalidCredentials
        | IdentityError::MissingToken
        | IdentityError::InvalidToken => StatusCode::UNAUTHORIZED,
        IdentityError::Unavailable(ref reason) => {
            error!(%reason, "identity provider failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

pub(crate) async fn signup_handler<P>(
    State(provider): State<Arc<P>>,
    Json(request): Json<SignupRequest>,
) -> Response
where
    P: IdentityProvider + 'static,
{
    match provider.signup(request) {
        Ok(user) => {
            info!(user_id = %user.id, "account created");
            (
                StatusCode::OK,
                Json(json!({ "success": true, "user": user })),
            )
                .into_response()
        }
        Err(err) => identity_error_response(err),
    }
}

pub(crate) async fn login_handler<P>(
    State(provider): State<Arc<P>>,
    Json(request): Json<LoginRequest>,
) -> Response
where
    P: IdentityProvider + 'static,
{
    match provider.login(&request.email, &request.password) {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(err) => identity_error_response(err),
    }
}

pub(crate) async fn session_handler(AuthSession(session): AuthSession) -> Response {
    (StatusCode::OK, Json(json!({ "user": session.user }))).into_response()
}
