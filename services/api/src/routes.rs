use crate::infra::{AppState, Services};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde_json::json;
use wardrobe_ai::events::event_router;
use wardrobe_ai::identity::{identity_router, IdentityHandle};
use wardrobe_ai::outfits::outfit_router;
use wardrobe_ai::shopping::shopping_router;
use wardrobe_ai::storage::image_router;
use wardrobe_ai::wardrobe::wardrobe_router;

pub(crate) fn with_wardrobe_routes(services: &Services) -> Router {
    identity_router(services.identity.clone())
        .merge(wardrobe_router(services.wardrobe.clone()))
        .merge(event_router(services.events.clone()))
        .merge(outfit_router(services.outfits.clone()))
        .merge(shopping_router(services.catalog.clone()))
        .merge(image_router(services.images.clone()))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .layer(Extension(IdentityHandle::new(services.identity.clone())))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "timestamp": Utc::now().to_rfc3339() }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;
    use wardrobe_ai::config::{
        AppConfig, AppEnvironment, AuthConfig, JitterMode, OutfitConfig, ServerConfig,
        StorageConfig, TelemetryConfig,
    };

    fn test_config() -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            auth: AuthConfig {
                token_secret: "routes-test-secret".to_string(),
                token_ttl_minutes: 15,
            },
            storage: StorageConfig {
                signing_secret: "routes-storage-secret".to_string(),
                public_base_url: "http://127.0.0.1:3000".to_string(),
                signed_url_ttl_secs: 3600,
                max_upload_bytes: 5 * 1024 * 1024,
            },
            outfits: OutfitConfig {
                jitter: JitterMode::Off,
            },
        }
    }

    fn app(ready: bool) -> Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_wardrobe_routes(&Services::in_memory(&test_config())).layer(Extension(state))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn healthcheck_reports_timestamp() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].as_str().is_some());
    }

    #[tokio::test]
    async fn readiness_tracks_the_flag() {
        let app = app(false);
        let request = Request::get("/ready").body(Body::empty()).unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let state = AppState {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        state.readiness.store(true, Ordering::Release);
        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn signup_login_and_generate_an_outfit() {
        let app = app(true);

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/auth/signup",
                None,
                json!({ "email": "ana@example.com", "password": "secret1", "name": "Ana" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["name"], "Ana");

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/auth/login",
                None,
                json!({ "email": "ana@example.com", "password": "secret1" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["access_token"].as_str().expect("token").to_string();

        for (category, name, style) in [
            ("top", "Oxford Shirt", "formal"),
            ("bottom", "Trousers", "formal"),
            ("shoes", "Derbies", "formal"),
        ] {
            let (status, _) = send(
                &app,
                json_request(
                    "POST",
                    "/api/v1/wardrobe",
                    Some(&token),
                    json!({ "item": {
                        "category": category,
                        "name": name,
                        "style": style,
                        "color": "navy",
                        "image": "https://cdn.example.com/item.png",
                    }}),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/outfits/generate",
                Some(&token),
                json!({ "occasion": "office", "weather": "", "color": "navy" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outfit"]["match_percentage"], 60);
        assert_eq!(body["outfit"]["items"].as_array().map(Vec::len), Some(3));

        let request = Request::get("/api/v1/shopping/recommendations")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["missing_categories"].as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn protected_routes_reject_unknown_tokens() {
        let app = app(true);
        let request = Request::get("/api/v1/events")
            .header(header::AUTHORIZATION, "Bearer forged")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }
}
