//! HTTP 接口集成测试

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use admin_records::api::{AppState, routes};
use admin_records::defaults::DEFAULT_PRODUCT_IMAGE_URL;
use admin_records::generators::{DataGenerator, GeneratorConfig};
use admin_records::models::{Product, ProductPatch};
use admin_records::service::{FallbackService, MemoryRecordService, RecordService, RecordServices};
use admin_records::store::FallbackStore;
use admin_shared::error::{AdminError, Result};

fn test_store() -> Arc<FallbackStore> {
    let generator = DataGenerator::seeded(GeneratorConfig::default(), 2024);
    Arc::new(FallbackStore::with_generator(Arc::new(generator), 10, 15))
}

fn create_test_app() -> Router {
    let services = RecordServices::memory(test_store());
    routes(Arc::new(AppState::new(services)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_users_with_limit() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/api/users?limit=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 10);

    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 3);

    // 最新的在前
    let created: Vec<&str> = users
        .iter()
        .map(|u| u["createdAt"].as_str().unwrap())
        .collect();
    let parsed: Vec<chrono::DateTime<chrono::Utc>> =
        created.iter().map(|c| c.parse().unwrap()).collect();
    assert!(parsed.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_list_users_zero_limit_returns_all() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/api/users?limit=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 10);
    assert_eq!(body["users"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_list_users_bad_query() {
    let app = create_test_app();
    let (status, body) = send(&app, "GET", "/api/users?limit=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = create_test_app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({
            "name": "Alice",
            "email": "alice@example.com",
            "role": "admin",
            "avatar": ""
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["role"], "admin");
    assert!(created["avatar"].as_str().unwrap().starts_with("https://"));
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, "GET", &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/api/users/{}", id),
        Some(json!({ "name": "Alicia" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Alicia");
    assert_eq!(updated["email"], "alice@example.com");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, body) = send(&app, "DELETE", &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(&app, "GET", &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(&app, "DELETE", &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_validation() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "name": "A", "email": "alice@example.com", "role": "user" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "name": "Alice", "email": "alice@example.com", "role": "root" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 10);
}

#[tokio::test]
async fn test_product_endpoints() {
    let app = create_test_app();

    let (status, list) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 15);

    let (status, created) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({
            "name": "Test Product",
            "description": "",
            "price": 99.99,
            "category": "electronics",
            "stock": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["imageUrl"], DEFAULT_PRODUCT_IMAGE_URL);
    assert_eq!(created["price"], 99.99);
    assert_eq!(created["stock"], 10);

    // 新建商品排在列表最前
    let (_, list) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(list[0]["id"], created["id"]);

    let id = created["id"].as_str().unwrap();
    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/api/products/{}", id),
        Some(json!({ "stock": 0, "imageUrl": "https://picsum.photos/seed/x/200/300" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["stock"], 0);
    assert_eq!(updated["name"], "Test Product");

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/products/missing",
        Some(json!({ "name": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_product_bodies() {
    let app = create_test_app();

    for body in [
        json!({ "name": "Lamp", "description": "", "price": 0, "category": "home", "stock": 1 }),
        json!({ "name": "Lamp", "description": "", "price": 5, "category": "home", "stock": -1 }),
        json!({ "name": "Lamp", "description": "", "price": 5, "category": "toys", "stock": 1 }),
        json!({ "name": "Lamp", "price": 5, "category": "home", "stock": 1 }),
    ] {
        let (status, _) = send(&app, "POST", "/api/products", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/products/any",
        Some(json!({ "imageUrl": "not a url" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// 始终失败的主存储
struct BrokenPrimary;

#[async_trait]
impl RecordService<Product> for BrokenPrimary {
    async fn list(&self) -> Result<Vec<Product>> {
        Err(AdminError::Unavailable {
            backend: "postgres".to_string(),
        })
    }

    async fn get_by_id(&self, _id: &str) -> Result<Option<Product>> {
        Err(AdminError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _patch: ProductPatch) -> Result<Product> {
        Err(AdminError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _id: &str, _patch: ProductPatch) -> Result<Option<Product>> {
        Err(AdminError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: &str) -> Result<bool> {
        Err(AdminError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[tokio::test]
async fn test_primary_failure_served_from_memory() {
    let store = test_store();
    let mut services = RecordServices::memory(Arc::clone(&store));
    services.products = Arc::new(FallbackService::new(
        Arc::new(BrokenPrimary),
        Arc::new(MemoryRecordService::<Product>::new(Arc::clone(&store))),
    ));
    let app = routes(Arc::new(AppState::new(services)));

    let (status, list) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 15);

    let (status, created) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({
            "name": "Offline",
            "description": "created while the database is down",
            "price": 1.5,
            "category": "food",
            "stock": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(store.products().count(), 16);

    let id = created["id"].as_str().unwrap();
    let (status, _) = send(&app, "DELETE", &format!("/api/products/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.products().count(), 15);
}

/// 在线但拒绝写入的主存储
struct RejectingPrimary;

#[async_trait]
impl RecordService<Product> for RejectingPrimary {
    async fn list(&self) -> Result<Vec<Product>> {
        Ok(Vec::new())
    }

    async fn get_by_id(&self, _id: &str) -> Result<Option<Product>> {
        Ok(None)
    }

    async fn create(&self, _patch: ProductPatch) -> Result<Product> {
        Err(AdminError::Validation("stock out of range".to_string()))
    }

    async fn update(&self, _id: &str, _patch: ProductPatch) -> Result<Option<Product>> {
        Err(AdminError::Validation("stock out of range".to_string()))
    }

    async fn delete(&self, _id: &str) -> Result<bool> {
        Ok(false)
    }
}

#[tokio::test]
async fn test_primary_rejection_is_not_written_to_memory() {
    let store = test_store();
    let mut services = RecordServices::memory(Arc::clone(&store));
    services.products = Arc::new(FallbackService::new(
        Arc::new(RejectingPrimary),
        Arc::new(MemoryRecordService::<Product>::new(Arc::clone(&store))),
    ));
    let app = routes(Arc::new(AppState::new(services)));

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({
            "name": "Rejected",
            "description": "",
            "price": 3.0,
            "category": "home",
            "stock": 5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(store.products().count(), 15);
}

#[tokio::test]
async fn test_stock_above_column_range_is_rejected() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({
            "name": "Huge",
            "description": "",
            "price": 3.0,
            "category": "home",
            "stock": 3_000_000_000u64
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "name": "  ", "email": "blank@example.com", "role": "user" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
