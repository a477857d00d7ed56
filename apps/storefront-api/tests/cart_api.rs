//! HTTP tests driving the router with `oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use storefront_api::{build_router, AppState, JwtManager};
use storefront_cart::{CartConfig, CartService, InMemoryCartStore, InMemoryCatalog};
use storefront_core::{Color, Money, Product, Size, Variant};
use storefront_db::{Database, DbConfig};
use tower::util::ServiceExt;
use tower_http::cors::CorsLayer;

const SECRET: &str = "test-secret";

fn tee() -> Product {
    Product::new(
        "Oversized Tee",
        Money::from_major_minor(20, 0),
        vec![Variant::new(Color::Black, Size::M, 5)],
    )
    .with_id("tee")
}

struct TestApp {
    router: Router,
    catalog: Arc<InMemoryCatalog>,
    token: String,
}

fn app() -> TestApp {
    let catalog = Arc::new(InMemoryCatalog::with_products([tee()]));
    let service = CartService::new(
        catalog.clone(),
        Arc::new(InMemoryCartStore::new()),
        CartConfig::default(),
    );
    let jwt = JwtManager::new(SECRET, 3600);
    let token = jwt.generate_token("user-1").unwrap();

    TestApp {
        router: build_router(AppState::new(service, jwt), CorsLayer::permissive()),
        catalog,
        token,
    }
}

impl TestApp {
    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.token.clone();
        self.send_raw(method, uri, Some(&token), body.map(|b| b.to_string()))
            .await
    }

    async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

fn selection(quantity: i64) -> Value {
    json!({ "productId": "tee", "color": "Black", "size": "M", "quantity": quantity })
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_cart_routes_require_token() {
    let app = app();

    let (status, body) = app.send_raw("GET", "/api/v1/cart", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = app
        .send_raw("GET", "/api/v1/cart", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let foreign = JwtManager::new("other-secret", 3600)
        .generate_token("user-1")
        .unwrap();
    let (status, _) = app
        .send_raw("GET", "/api/v1/cart/checkout", Some(&foreign), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_is_checked_before_body() {
    let app = app();

    let (status, _) = app
        .send_raw("POST", "/api/v1/cart/add", None, Some("{not json".into()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Cart operations
// =============================================================================

#[tokio::test]
async fn test_empty_cart() {
    let app = app();

    let (status, body) = app.send("GET", "/api/v1/cart", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "items": [], "totalItems": 0, "totalPrice": 0 }));
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let app = app();

    let (status, body) = app.send("POST", "/api/v1/cart/add", Some(selection(3))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["quantity"], 3);
    assert_eq!(body["items"][0]["lineTotal"], 6000);
    assert_eq!(body["items"][0]["variant"], json!({ "color": "Black", "size": "M" }));
    assert_eq!(body["totalItems"], 3);

    let (status, body) = app.send("POST", "/api/v1/cart/add", Some(selection(4))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
    assert!(body["message"].as_str().unwrap().contains("Oversized Tee"));

    let (status, body) = app.send("PUT", "/api/v1/cart/update", Some(selection(5))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["lineTotal"], 10000);

    let (status, body) = app.send("GET", "/api/v1/cart/checkout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["summary"],
        json!({ "totalItems": 1, "totalQuantity": 5, "subtotal": 10000, "currency": "INR" })
    );

    let (status, body) = app.send("PUT", "/api/v1/cart/update", Some(selection(0))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["totalPrice"], 0);
}

#[tokio::test]
async fn test_remove_and_clear() {
    let app = app();
    app.send("POST", "/api/v1/cart/add", Some(selection(1))).await;

    let remove = json!({ "productId": "tee", "color": "Black", "size": "M" });
    let (status, body) = app.send("DELETE", "/api/v1/cart/remove", Some(remove.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));

    let (status, body) = app.send("DELETE", "/api/v1/cart/remove", Some(remove)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = app.send("DELETE", "/api/v1/cart/clear", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.send("DELETE", "/api/v1/cart/clear", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 0);
}

#[tokio::test]
async fn test_reconcile_drops_deactivated_lines() {
    let app = app();
    app.send("POST", "/api/v1/cart/add", Some(selection(1))).await;
    app.catalog.set_active("tee", false).await;

    let (status, body) = app.send("POST", "/api/v1/cart/reconcile", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn test_validation_errors_are_400() {
    let app = app();

    let (status, body) = app
        .send("POST", "/api/v1/cart/add", Some(json!({ "productId": "tee", "size": "M" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = app.send("POST", "/api/v1/cart/add", Some(selection(0))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("PUT", "/api/v1/cart/update", Some(selection(-1))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let token = app.token.clone();
    let (status, body) = app
        .send_raw("POST", "/api/v1/cart/add", Some(&token), Some("{not json".into()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_not_found_errors_are_404() {
    let app = app();

    let unknown = json!({ "productId": "nope", "color": "Black", "size": "M" });
    let (status, body) = app.send("POST", "/api/v1/cart/add", Some(unknown)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = app.send("PUT", "/api/v1/cart/update", Some(selection(1))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_errors() {
    let app = app();

    let (status, body) = app.send("GET", "/api/v1/cart/checkout", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "cart is empty");

    app.send("POST", "/api/v1/cart/add", Some(selection(2))).await;
    app.catalog.set_active("tee", false).await;
    let (status, body) = app.send("GET", "/api/v1/cart/checkout", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// =============================================================================
// Health + SQLite wiring
// =============================================================================

#[tokio::test]
async fn test_healthcheck_without_database() {
    let app = app();

    let (status, body) = app.send_raw("GET", "/api/v1/healthcheck", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "database": "none" }));
}

#[tokio::test]
async fn test_sqlite_backed_router() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    db.catalog().insert(&tee()).await.unwrap();

    let service = CartService::new(
        Arc::new(db.catalog()),
        Arc::new(db.carts()),
        CartConfig::default(),
    );
    let jwt = JwtManager::new(SECRET, 3600);
    let token = jwt.generate_token("user-1").unwrap();
    let app = TestApp {
        router: build_router(
            AppState::new(service, jwt).with_database(db.clone()),
            CorsLayer::permissive(),
        ),
        catalog: Arc::new(InMemoryCatalog::new()),
        token,
    };

    let (_, health) = app.send_raw("GET", "/api/v1/healthcheck", None, None).await;
    assert_eq!(health["database"], "connected");

    let (status, body) = app.send("POST", "/api/v1/cart/add", Some(selection(2))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 2);

    let (status, body) = app.send("GET", "/api/v1/cart", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["unitPrice"], 2000);
}
