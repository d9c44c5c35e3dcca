//! Role management endpoints.

use axum::{extract::Path, Json};
use serde::Deserialize;

use crate::database::models::SysRole;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::ApiResponse;

/// GET /admin/sys/roles
pub async fn list() -> Result<ApiResponse<Vec<SysRole>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    Ok(ApiResponse::success(SysRole::list(&pool).await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sort: i32,
}

/// POST /admin/sys/roles
pub async fn create(
    Json(payload): Json<CreateRoleRequest>,
) -> Result<ApiResponse<SysRole>, ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("Role name is required"));
    }

    let pool = DatabaseManager::pool().await?;
    let role = SysRole::create(&pool, name, payload.description.as_deref(), payload.sort).await?;

    Ok(ApiResponse::created(role))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub name: String,
    pub description: Option<String>,
    pub sort: i32,
    pub status: bool,
}

/// PUT /admin/sys/roles/:id
pub async fn update(
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<ApiResponse<SysRole>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let role = SysRole::update(
        &pool,
        id,
        payload.name.trim(),
        payload.description.as_deref(),
        payload.sort,
        payload.status,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Role not found"))?;

    Ok(ApiResponse::success(role))
}

/// DELETE /admin/sys/roles/:id
pub async fn delete(Path(id): Path<i64>) -> Result<ApiResponse<()>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    if !SysRole::delete(&pool, id).await? {
        return Err(ApiError::not_found("Role not found"));
    }

    Ok(ApiResponse::success(()))
}

/// GET /admin/sys/roles/:id/apis — ids of the APIs granted to this role.
pub async fn apis(Path(id): Path<i64>) -> Result<ApiResponse<Vec<i64>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    if SysRole::find_by_id(&pool, id).await?.is_none() {
        return Err(ApiError::not_found("Role not found"));
    }

    Ok(ApiResponse::success(
        SysRole::api_ids_for_role(&pool, id).await?,
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetApisRequest {
    pub api_ids: Vec<i64>,
}

/// PUT /admin/sys/roles/:id/apis — replace this role's API grants.
pub async fn set_apis(
    Path(id): Path<i64>,
    Json(payload): Json<SetApisRequest>,
) -> Result<ApiResponse<()>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    if SysRole::find_by_id(&pool, id).await?.is_none() {
        return Err(ApiError::not_found("Role not found"));
    }

    SysRole::set_role_apis(&pool, id, &payload.api_ids).await?;

    Ok(ApiResponse::success(()))
}
