//! 用户接口

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use tracing::info;

use admin_shared::error::{AdminError, Result};

use super::dto::{CreateUserRequest, DeleteResponse, ListUsersQuery, UpdateUserRequest, UserListResponse};
use super::{AppState, query, validated};
use crate::models::{Record, User, sort_newest_first};

/// 构建用户路由
pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).patch(update_user).delete(delete_user))
}

/// 用户列表，最新创建的在前，`limit` 只截断列表不影响 total，0 表示不限制
async fn list_users(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<Json<UserListResponse>> {
    let params = query(params)?;

    let mut users = state.services.users.list().await?;
    sort_newest_first(&mut users);

    let total = users.len();
    if let Some(limit) = params.limit.filter(|limit| *limit > 0) {
        users.truncate(limit);
    }

    Ok(Json(UserListResponse { users, total }))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    state
        .services
        .users
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AdminError::not_found(User::KIND, &id))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let req = validated(payload)?;

    let user = state.services.users.create(req.into()).await?;
    info!(user_id = %user.id, "用户已创建");

    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>> {
    let req = validated(payload)?;

    state
        .services
        .users
        .update(&id, req.into())
        .await?
        .map(Json)
        .ok_or_else(|| AdminError::not_found(User::KIND, &id))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if !state.services.users.delete(&id).await? {
        return Err(AdminError::not_found(User::KIND, &id));
    }

    info!(user_id = %id, "用户已删除");
    Ok(Json(DeleteResponse { success: true }))
}
