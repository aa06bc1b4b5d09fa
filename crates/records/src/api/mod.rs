//! HTTP 接口
//!
//! `/api/users` 与 `/api/products` 的 CRUD 路由，以及 `/health` 健康检查。

pub mod dto;
pub mod products;
pub mod users;

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use validator::Validate;

use admin_shared::error::{AdminError, Result};

use crate::service::RecordServices;

/// 路由共享状态
pub struct AppState {
    pub services: RecordServices,
}

impl AppState {
    pub fn new(services: RecordServices) -> Self {
        Self { services }
    }
}

/// 构建完整路由
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/users", users::user_routes())
        .nest("/api/products", products::product_routes())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// 解析并校验 JSON 请求体，解析失败与校验失败都返回 400
pub(crate) fn validated<T: Validate>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    let Json(body) = payload.map_err(|rejection| AdminError::Validation(rejection.body_text()))?;
    body.validate()?;
    Ok(body)
}

/// 解析查询参数，失败返回 400
pub(crate) fn query<T>(params: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    params
        .map(|Query(inner)| inner)
        .map_err(|rejection| AdminError::Validation(rejection.body_text()))
}
