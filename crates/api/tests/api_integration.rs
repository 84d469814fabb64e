//! Integration tests for the API server.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use store::{InMemoryStore, StoreExt, seed_catalog};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

/// App over a store seeded with Apple(30), Orange(25), Banana(40).
async fn setup() -> axum::Router {
    setup_with_store().await.0
}

async fn setup_with_store() -> (axum::Router, InMemoryStore) {
    let store = InMemoryStore::new();
    store.seed(seed_catalog()).await.unwrap();
    let state = api::create_default_state(store.clone());
    let app = api::create_app(state, get_metrics_handle());
    (app, store)
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn apple_order(quantity: i64) -> Value {
    json!({
        "customerName": "Ada",
        "items": [{ "fruitId": 1, "quantity": quantity, "price": 1.0 }],
        "totalAmount": quantity as f64
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = setup().await;

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "fruit-storefront");
}

#[tokio::test]
async fn test_list_seeded_fruits() {
    let app = setup().await;

    let (status, json) = send(&app, "GET", "/fruits", None).await;

    assert_eq!(status, StatusCode::OK);
    let fruits = json.as_array().unwrap();
    assert_eq!(fruits.len(), 3);
    assert_eq!(fruits[0]["name"], "Apple");
    assert_eq!(fruits[0]["price"], "1.00");
    assert_eq!(fruits[0]["stock"], 30);
}

#[tokio::test]
async fn test_create_fruit_with_textual_stock() {
    let app = setup().await;

    let (status, json) = send(
        &app,
        "POST",
        "/fruits",
        Some(json!({ "name": "Mango", "price": "3.25", "stock": "12" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["name"], "Mango");
    assert_eq!(json["price"], "3.25");
    assert_eq!(json["stock"], 12);

    let id = json["id"].as_i64().unwrap();
    let (status, json) = send(&app, "GET", &format!("/fruits/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Mango");
}

#[tokio::test]
async fn test_create_fruit_rejects_blank_name() {
    let app = setup().await;

    let (status, json) = send(
        &app,
        "POST",
        "/fruits",
        Some(json!({ "name": "  ", "price": 1.0, "stock": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some());
}

#[tokio::test]
async fn test_put_fruits_sets_stock() {
    let app = setup().await;

    let (status, json) = send(&app, "PUT", "/fruits", Some(json!({ "id": 2, "stock": 99 }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Orange");
    assert_eq!(json["stock"], 99);
}

#[tokio::test]
async fn test_set_stock_by_path() {
    let app = setup().await;

    let (status, json) = send(&app, "PUT", "/fruits/3/stock", Some(json!({ "stock": 0 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stock"], 0);

    let (status, _) = send(&app, "PUT", "/fruits/3/stock", Some(json!({ "stock": -1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_stock_for_unknown_fruit() {
    let app = setup().await;

    let (status, json) = send(&app, "PUT", "/fruits/404/stock", Some(json!({ "stock": 5 }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_place_order_decrements_stock() {
    let app = setup().await;

    let (status, json) = send(&app, "POST", "/orders", Some(apple_order(5))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["customerName"], "Ada");
    assert_eq!(json["totalAmount"], "5.00");
    assert_eq!(json["totalDisplay"], "$5.00");
    assert_eq!(json["status"], "pending");
    assert_eq!(json["items"][0]["fruitId"], 1);
    assert_eq!(json["items"][0]["quantity"], 5);
    assert_eq!(json["items"][0]["priceAtPurchase"], "1.00");

    let (_, apple) = send(&app, "GET", "/fruits/1", None).await;
    assert_eq!(apple["stock"], 25);
}

#[tokio::test]
async fn test_place_order_accepts_unit_price_and_missing_total() {
    let app = setup().await;

    let (status, json) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customerName": "Grace",
            "items": [
                { "fruitId": 2, "quantity": 2, "unitPrice": "1.50" },
                { "fruitId": 3, "quantity": 1, "unitPrice": 2 }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["totalAmount"], "5.00");
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_place_order_insufficient_stock() {
    let app = setup().await;

    let (status, json) = send(&app, "POST", "/orders", Some(apple_order(31))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Insufficient stock"));

    let (_, apple) = send(&app, "GET", "/fruits/1", None).await;
    assert_eq!(apple["stock"], 30);
    let (_, orders) = send(&app, "GET", "/orders", None).await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_place_order_huge_quantity_is_insufficient_stock() {
    let app = setup().await;

    for body in [
        json!({
            "customerName": "Ada",
            "items": [{ "fruitId": 1, "quantity": 100_000_000_000_000_000_i64, "price": 1 }],
            "totalAmount": 1
        }),
        json!({
            "customerName": "Ada",
            "items": [{ "fruitId": 1, "quantity": i64::MAX, "price": "1.00" }]
        }),
    ] {
        let (status, json) = send(&app, "POST", "/orders", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("Insufficient stock"));
    }

    let (_, apple) = send(&app, "GET", "/fruits/1", None).await;
    assert_eq!(apple["stock"], 30);
}

#[tokio::test]
async fn test_place_order_unknown_fruit() {
    let app = setup().await;

    let (status, _) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customerName": "Ada",
            "items": [{ "fruitId": 77, "quantity": 1, "price": 1 }],
            "totalAmount": 1
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_place_order_validation_errors() {
    let app = setup().await;

    let (status, _) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({ "customerName": "Ada", "items": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customerName": "",
            "items": [{ "fruitId": 1, "quantity": 1, "price": 1 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customerName": "Ada",
            "items": [{ "fruitId": 1, "quantity": 0, "price": 1 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/orders")
                .header("content-type", "application/json")
                .body(Body::from("{\"customerName\": \"Ada\", \"items\": [oops]}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().is_some());
}

#[tokio::test]
async fn test_get_order_and_not_found() {
    let app = setup().await;

    let (_, placed) = send(&app, "POST", "/orders", Some(apple_order(2))).await;
    let id = placed["id"].as_i64().unwrap();

    let (status, json) = send(&app, "GET", &format!("/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["items"][0]["fruitName"], "Apple");

    let (status, _) = send(&app, "GET", "/orders/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_order_id_format() {
    let app = setup().await;

    let (status, json) = send(&app, "GET", "/orders/not-a-number", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some());
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let app = setup().await;

    send(&app, "POST", "/orders", Some(apple_order(1))).await;
    send(&app, "POST", "/orders", Some(apple_order(2))).await;

    let (status, json) = send(&app, "GET", "/orders", None).await;

    assert_eq!(status, StatusCode::OK);
    let orders = json.as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["items"][0]["quantity"], 2);
    assert_eq!(orders[1]["items"][0]["quantity"], 1);
}

#[tokio::test]
async fn test_analytics_after_orders() {
    let app = setup().await;

    send(&app, "POST", "/orders", Some(apple_order(5))).await;
    send(&app, "POST", "/orders", Some(apple_order(1))).await;

    let (status, json) = send(&app, "GET", "/analytics", None).await;

    assert_eq!(status, StatusCode::OK);
    let daily = json["dailySales"].as_array().unwrap();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0]["total"], "6.00");

    let fruit_sales = json["fruitSales"].as_array().unwrap();
    assert_eq!(fruit_sales.len(), 1);
    assert_eq!(fruit_sales[0]["fruitId"], 1);
    assert_eq!(fruit_sales[0]["fruitName"], "Apple");
    assert_eq!(fruit_sales[0]["totalQuantity"], 6);
    assert_eq!(fruit_sales[0]["totalSales"], "2.00");
    assert_eq!(fruit_sales[0]["totalRevenue"], "6.00");
}

#[tokio::test]
async fn test_analytics_granularity_parameter() {
    let app = setup().await;
    send(&app, "POST", "/orders", Some(apple_order(1))).await;

    let (status, json) = send(&app, "GET", "/analytics?granularity=timestamp", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["dailySales"][0]["date"].as_str().unwrap().contains('T'));

    let (status, _) = send(&app, "GET", "/analytics?granularity=week", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let (app, store) = setup_with_store().await;
    store.set_fail_on_place_order(true).await;

    let (status, json) = send(&app, "POST", "/orders", Some(apple_order(1))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error");
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = setup().await;

    let (status, json) = send(&app, "GET", "/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Route not found");
}

#[tokio::test]
async fn test_metrics_endpoint_reports_placements() {
    let app = setup().await;
    send(&app, "POST", "/orders", Some(apple_order(1))).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("orders_placed_total"));
}
