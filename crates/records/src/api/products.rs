//! 商品接口

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use tracing::info;

use admin_shared::error::{AdminError, Result};

use super::dto::{CreateProductRequest, DeleteResponse, ProductListResponse, UpdateProductRequest};
use super::{AppState, validated};
use crate::models::{Product, Record, sort_newest_first};

/// 构建商品路由
pub fn product_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

/// 商品列表，最新创建的在前
async fn list_products(State(state): State<Arc<AppState>>) -> Result<Json<ProductListResponse>> {
    let mut products = state.services.products.list().await?;
    sort_newest_first(&mut products);
    Ok(Json(products))
}

async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    state
        .services
        .products
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AdminError::not_found(Product::KIND, &id))
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let req = validated(payload)?;

    let product = state.services.products.create(req.into()).await?;
    info!(product_id = %product.id, "商品已创建");

    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Product>> {
    let req = validated(payload)?;

    state
        .services
        .products
        .update(&id, req.into())
        .await?
        .map(Json)
        .ok_or_else(|| AdminError::not_found(Product::KIND, &id))
}

async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if !state.services.products.delete(&id).await? {
        return Err(AdminError::not_found(Product::KIND, &id));
    }

    info!(product_id = %id, "商品已删除");
    Ok(Json(DeleteResponse { success: true }))
}
