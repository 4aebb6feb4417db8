use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::test_support::{new_item, read_json_body, session, PNG_DATA_URL};
use crate::wardrobe::ItemCategory;

fn authorized(builder: axum::http::request::Builder, user: &str) -> axum::http::request::Builder {
    builder.header(header::AUTHORIZATION, format!("Bearer token-{user}"))
}

#[tokio::test]
async fn list_route_requires_a_bearer_token() {
    let harness = harness();
    let response = router(harness.service)
        .oneshot(
            Request::get("/api/v1/wardrobe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "Unauthorized");
}

#[tokio::test]
async fn add_route_returns_created_item() {
    let harness = harness();
    let body = json!({
        "item": {
            "category": "accessories",
            "name": "Silk Scarf",
            "color": "mint",
            "style": "party",
            "image": PNG_DATA_URL,
        }
    });

    let response = router(harness.service.clone())
        .oneshot(
            authorized(Request::post("/api/v1/wardrobe"), "ana")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], true);
    assert_eq!(payload["item"]["category"], "accessories");
    assert!(payload["item"]["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(harness.service.list(&session("ana"), None).unwrap().len(), 1);
}

#[tokio::test]
async fn add_route_rejects_missing_name() {
    let harness = harness();
    let body = json!({ "item": { "category": "top", "image": "https://cdn.example.com/a.png" } });

    let response = router(harness.service)
        .oneshot(
            authorized(Request::post("/api/v1/wardrobe"), "ana")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "Please provide item name and image");
}

#[tokio::test]
async fn list_route_filters_by_category() {
    let harness = harness();
    let ana = session("ana");
    harness
        .service
        .import(
            &ana,
            vec![
                new_item(ItemCategory::Top, "Shirt"),
                new_item(ItemCategory::Footwear, "Boots"),
            ],
        )
        .unwrap();

    let response = router(harness.service)
        .oneshot(
            authorized(Request::get("/api/v1/wardrobe?category=footwear"), "ana")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let items = payload["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Boots");
}

#[tokio::test]
async fn import_route_reports_bad_rows() {
    let harness = harness();
    let csv = "name,category,color,style,seasons,occasions,image\n\
               Denim Jeans,bottom,blue,casual,all,weekend,https://cdn.example.com/j.png\n\
               Flip Flops,sandals,black,casual,summer,,https://cdn.example.com/f.png\n";

    let response = router(harness.service.clone())
        .oneshot(
            authorized(Request::post("/api/v1/wardrobe/import"), "ana")
                .header(header::CONTENT_TYPE, "text/csv")
                .body(Body::from(csv))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("line 3")));
    assert!(harness.service.list(&session("ana"), None).unwrap().is_empty());
}

#[tokio::test]
async fn import_route_stores_nothing_when_a_row_is_incomplete() {
    let harness = harness();
    let csv = "name,category,color,style,seasons,occasions,image\n\
               Denim Jeans,bottom,blue,casual,all,weekend,https://cdn.example.com/j.png\n\
               Chelsea Boots,footwear,brown,formal,winter,,\n";

    let response = router(harness.service.clone())
        .oneshot(
            authorized(Request::post("/api/v1/wardrobe/import"), "ana")
                .header(header::CONTENT_TYPE, "text/csv")
                .body(Body::from(csv))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "Please provide item name and image");
    assert!(harness.service.list(&session("ana"), None).unwrap().is_empty());
}

#[tokio::test]
async fn import_route_adds_every_row() {
    let harness = harness();
    let csv = "name,category,color,style,seasons,occasions,image\n\
               Denim Jeans,bottom,blue,casual,all,weekend,https://cdn.example.com/j.png\n\
               Chelsea Boots,footwear,brown,formal,winter,work;dinner,https://cdn.example.com/b.png\n";

    let response = router(harness.service.clone())
        .oneshot(
            authorized(Request::post("/api/v1/wardrobe/import"), "ana")
                .body(Body::from(csv))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(payload["items"][1]["occasions"], json!(["dinner", "work"]));
}

#[tokio::test]
async fn delete_handler_returns_not_found_for_unknown_items() {
    let harness = harness();
    let response = crate::wardrobe::router::delete_handler(
        State(harness.service),
        crate::identity::AuthSession(session("ana")),
        Path("missing".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "Item or image not found");
}

#[tokio::test]
async fn refresh_route_returns_a_fresh_link() {
    let harness = harness();
    let ana = session("ana");
    let mut submission = new_item(ItemCategory::Top, "Blazer");
    submission.image = PNG_DATA_URL.to_string();
    let item = harness.service.add(&ana, submission).unwrap();

    let response = router(harness.service)
        .oneshot(
            authorized(
                Request::post(format!("/api/v1/wardrobe/{}/refresh-image", item.id)),
                "ana",
            )
            .body(Body::empty())
            .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], true);
    assert!(payload["image_url"]
        .as_str()
        .is_some_and(|url| url.contains(&format!("ana/{}.png", item.id))));
    assert!(payload["expires_at"].is_string());
}
