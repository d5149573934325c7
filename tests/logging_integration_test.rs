use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use car_inventory_api::{
    app,
    repository::MemoryCarStore,
    service::{CarService, ListPolicy},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use tracing_test::traced_test;

// Requests are driven with `oneshot` so handlers run inside the test's span,
// where `logs_contain` can see their output.
fn create_test_app() -> Router {
    app(CarService::new(
        Arc::new(MemoryCarStore::new()),
        ListPolicy::default(),
    ))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn test_car() -> Value {
    json!({
        "make": "Mazda",
        "model": "CX-5",
        "release_date": "2022-05-01T00:00:00Z",
        "transmission_type": "AUTOMATIC",
        "size": "Compact",
        "style": "SUV",
        "price": 31000
    })
}

#[traced_test]
#[tokio::test]
async fn test_create_car_should_log_created_id() {
    let app = create_test_app();

    let (status, body) = send(&app, json_request("POST", "/", &test_car())).await;

    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_str().unwrap();
    assert!(logs_contain("[car-inventory-api] Received create car request"));
    assert!(logs_contain(&format!("Created car: {}", id)));
}

#[traced_test]
#[tokio::test]
async fn test_list_cars_should_log_page_summary() {
    let app = create_test_app();
    send(&app, json_request("POST", "/", &test_car())).await;

    let request = Request::builder()
        .uri("/?page=1&limit=5")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(logs_contain("Listed 1 of 1 cars (page 1, limit 5"));
}

#[traced_test]
#[tokio::test]
async fn test_validation_failure_should_log_warning() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/?search=x&color=red")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Query color is not allowed");
    assert!(logs_contain("Validation error: Query color is not allowed"));
}

#[traced_test]
#[tokio::test]
async fn test_soft_delete_should_log_target_id() {
    let app = create_test_app();
    let (_, created) = send(&app, json_request("POST", "/", &test_car())).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", id))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isDeleted"], true);
    assert!(logs_contain(&format!("Received delete request for car: {}", id)));
    assert!(logs_contain(&format!("Soft-deleted car: {}", id)));
}

#[traced_test]
#[tokio::test]
async fn test_not_found_should_log_warning() {
    let app = create_test_app();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", uuid::Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(logs_contain("Not found: Car not found"));
}
