//! 用户 CRUD 处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use super::model::{CreateUserRequest, UpdateUserRequest, User};
use crate::app::AppState;
use crate::core::{
    error::{AppError, USER_NOT_FOUND},
    extract::ValidatedJson,
};

pub const USER_DELETED: &str = "Benutzer gelöscht";

// 格式错误的 id 与不存在的用户一样按 404 处理
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| not_found())
}

fn not_found() -> AppError {
    AppError::NotFound(USER_NOT_FOUND.to_string())
}

/// 创建用户
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.users.insert(payload.into()).await?;

    info!("已创建用户: {} ({})", user.name, user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// 根据 ID 获取用户
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let id = parse_id(&id)?;
    let user = state.users.find(id).await?.ok_or_else(not_found)?;
    Ok(Json(user))
}

/// 部分更新用户
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    let id = parse_id(&id)?;
    let user = state
        .users
        .update(id, payload.into())
        .await?
        .ok_or_else(not_found)?;

    info!("已更新用户: {} ({})", user.name, user.id);
    Ok(Json(user))
}

/// 删除用户
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    if !state.users.delete(id).await? {
        return Err(not_found());
    }

    info!("已删除用户: {}", id);
    Ok(Json(json!({ "message": USER_DELETED })))
}
