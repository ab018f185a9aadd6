mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{seeded_clients, FailingStore};
use sales_service::api;
use sales_service::cache::InMemoryCache;
use sales_service::jobs::{JobQueue, JobReceiver};
use sales_service::orders::{OrderService, OrderSettings};
use sales_service::store::{InMemoryOrderStore, OrderStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn app_with(store: Arc<dyn OrderStore>) -> (Router, JobReceiver) {
    let (customers, products) = seeded_clients().await;
    let (jobs, receiver) = JobQueue::bounded(100);
    let service = OrderService::new(
        store,
        Arc::new(InMemoryCache::new()),
        customers,
        products,
        jobs,
        OrderSettings::default(),
    );
    (api::router(service), receiver)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_orders(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_reports_dependencies() {
    let (app, _receiver) = app_with(Arc::new(InMemoryOrderStore::new())).await;

    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "ok", "service": "orders", "database": "connected", "cache": "connected"})
    );
}

#[tokio::test]
async fn test_create_then_list() {
    let (app, receiver) = app_with(Arc::new(InMemoryOrderStore::new())).await;

    let (status, body) = send(
        &app,
        post_orders(r#"{"customer_id": 1, "product_id": 1, "quantity": 3}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let data = &body["data"];
    assert_eq!(data["id"], 1);
    assert_eq!(data["total_value"], 30.0);
    assert_eq!(data["quantity"], 3);
    assert_eq!(data["customer"]["name"], "João");
    assert_eq!(data["product"]["name"], "Product A");
    assert!(data.get("partial").is_none());
    assert!(receiver.try_recv().await.is_some());

    let (status, body) = send(&app, get("/orders")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "store");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["customer_id"], 1);

    let (_, body) = send(&app, get("/orders")).await;
    assert_eq!(body["source"], "cache");
}

#[tokio::test]
async fn test_invalid_bodies_are_validation_errors() {
    let (app, receiver) = app_with(Arc::new(InMemoryOrderStore::new())).await;

    for body in [
        r#"{"product_id": 1, "quantity": 1}"#,
        r#"{"customer_id": 1, "product_id": 1}"#,
        r#"{"customer_id": "one", "product_id": 1, "quantity": 1}"#,
        r#"{"customer_id": 1, "product_id": 1, "quantity": 0}"#,
        r#"{"customer_id": 1, "product_id": 1, "quantity": -2}"#,
        r#"{"customer_id": 1, "product_id": 2, "quantity": 5000000}"#,
        "not json",
    ] {
        let (status, response) = send(&app, post_orders(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response["code"], "VALIDATION_ERROR", "body: {body}");
        assert!(response["error"].is_string());
    }

    assert!(receiver.try_recv().await.is_none());
}

#[tokio::test]
async fn test_unknown_customer_is_bad_request() {
    let (app, _receiver) = app_with(Arc::new(InMemoryOrderStore::new())).await;

    let (status, body) = send(
        &app,
        post_orders(r#"{"customer_id": 999, "product_id": 1, "quantity": 1}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["error"], "Customer not found: customer_999");
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let (app, _receiver) = app_with(Arc::new(FailingStore)).await;

    let (status, body) = send(&app, get("/orders")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "PERSISTENCE_ERROR");

    let (status, body) = send(
        &app,
        post_orders(r#"{"customer_id": 1, "product_id": 1, "quantity": 1}"#),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "PERSISTENCE_ERROR");

    let (_, body) = send(&app, get("/health")).await;
    assert_eq!(body["database"], "disconnected");
}
