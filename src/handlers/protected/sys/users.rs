//! User management endpoints.

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::password;
use crate::database::models::{SysRole, User};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::handlers::page_params;
use crate::middleware::{ApiResponse, AuthUser, Page};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub keyword: Option<String>,
    pub department_id: Option<i64>,
    pub status: Option<i32>,
}

/// GET /admin/sys/users
pub async fn list(Query(query): Query<ListQuery>) -> Result<ApiResponse<Page<User>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let (page, page_size, offset) = page_params(query.page, query.page_size);

    let (users, total) = User::list(
        &pool,
        query.keyword.as_deref().filter(|k| !k.is_empty()),
        query.department_id,
        query.status,
        page_size,
        offset,
    )
    .await?;

    Ok(ApiResponse::success(Page::new(users, total, page, page_size)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub user: User,
    pub roles: Vec<SysRole>,
}

/// GET /admin/sys/users/:id
pub async fn detail(Path(id): Path<i64>) -> Result<ApiResponse<UserDetail>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let user = User::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    let roles = SysRole::roles_for_user(&pool, id).await?;

    Ok(ApiResponse::success(UserDetail { user, roles }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub department_id: Option<i64>,
    #[serde(default)]
    pub role_ids: Vec<i64>,
}

/// POST /admin/sys/users
pub async fn create(
    Json(payload): Json<CreateUserRequest>,
) -> Result<ApiResponse<User>, ApiError> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(ApiError::bad_request("Username is required"));
    }
    if payload.password.len() < 6 {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }

    let pool = DatabaseManager::pool().await?;

    if User::find_by_username(&pool, username).await?.is_some() {
        return Err(ApiError::conflict("Username is already taken"));
    }

    let user = User::create(
        &pool,
        username,
        &password::hash_password(&payload.password),
        payload.email.as_deref(),
        payload.mobile.as_deref(),
        payload.department_id,
    )
    .await?;

    if !payload.role_ids.is_empty() {
        SysRole::set_user_roles(&pool, user.id, &payload.role_ids).await?;
    }

    Ok(ApiResponse::created(user))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub department_id: Option<i64>,
    pub status: i32,
}

/// PUT /admin/sys/users/:id
pub async fn update(
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<ApiResponse<User>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let user = User::update(
        &pool,
        id,
        payload.email.as_deref(),
        payload.mobile.as_deref(),
        payload.department_id,
        payload.status,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(user))
}

/// DELETE /admin/sys/users/:id
pub async fn delete(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, ApiError> {
    if id == auth_user.user_id {
        return Err(ApiError::bad_request("You cannot delete your own account"));
    }

    let pool = DatabaseManager::pool().await?;

    if !User::delete(&pool, id).await? {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(ApiResponse::success(()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRolesRequest {
    pub role_ids: Vec<i64>,
}

/// PUT /admin/sys/users/:id/roles
pub async fn set_roles(
    Path(id): Path<i64>,
    Json(payload): Json<SetRolesRequest>,
) -> Result<ApiResponse<()>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    if User::find_by_id(&pool, id).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    SysRole::set_user_roles(&pool, id, &payload.role_ids).await?;

    Ok(ApiResponse::success(()))
}

#[derive(Debug, Deserialize)]
pub struct AdminResetPasswordRequest {
    pub password: String,
}

/// PUT /admin/sys/users/:id/reset-password
///
/// Administrative reset; the self-service flow with old-password
/// verification lives under /admin/auth/reset-password.
pub async fn reset_password(
    Path(id): Path<i64>,
    Json(payload): Json<AdminResetPasswordRequest>,
) -> Result<ApiResponse<()>, ApiError> {
    if payload.password.len() < 6 {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }

    let pool = DatabaseManager::pool().await?;

    if !User::set_password(&pool, id, &password::hash_password(&payload.password)).await? {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(ApiResponse::success(()))
}
