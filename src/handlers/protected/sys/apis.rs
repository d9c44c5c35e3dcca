//! API permission record management.
//!
//! The console renders these rows as a tree (via `parent_id`) and assigns
//! them to roles; the flat list endpoint matches what the tree transform
//! expects.

use axum::{extract::Path, Json};
use serde::Deserialize;

use crate::database::models::SysApi;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::ApiResponse;

/// GET /admin/sys/apis
pub async fn list() -> Result<ApiResponse<Vec<SysApi>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    Ok(ApiResponse::success(SysApi::list(&pool).await?))
}

/// GET /admin/sys/apis/:id
pub async fn detail(Path(id): Path<i64>) -> Result<ApiResponse<SysApi>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let api = SysApi::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("API record not found"))?;

    Ok(ApiResponse::success(api))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiRequest {
    pub parent_id: Option<i64>,
    pub name: String,
    pub permission_code: String,
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub is_menu: bool,
    pub description: Option<String>,
}

/// POST /admin/sys/apis
pub async fn create(Json(payload): Json<CreateApiRequest>) -> Result<ApiResponse<SysApi>, ApiError> {
    if payload.name.trim().is_empty() || payload.permission_code.trim().is_empty() {
        return Err(ApiError::bad_request(
            "Name and permission code are required",
        ));
    }

    let pool = DatabaseManager::pool().await?;

    let api = SysApi::create(
        &pool,
        payload.parent_id,
        payload.name.trim(),
        payload.permission_code.trim(),
        payload.url.trim(),
        &payload.method.to_uppercase(),
        payload.sort,
        payload.is_menu,
        payload.description.as_deref(),
    )
    .await?;

    Ok(ApiResponse::created(api))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApiRequest {
    pub parent_id: Option<i64>,
    pub name: String,
    pub permission_code: String,
    pub url: String,
    pub method: String,
    pub sort: i32,
    pub status: i32,
    pub is_menu: bool,
    pub description: Option<String>,
}

/// PUT /admin/sys/apis/:id
pub async fn update(
    Path(id): Path<i64>,
    Json(payload): Json<UpdateApiRequest>,
) -> Result<ApiResponse<SysApi>, ApiError> {
    if payload.parent_id == Some(id) {
        return Err(ApiError::bad_request("An API cannot be its own parent"));
    }

    let pool = DatabaseManager::pool().await?;

    let api = SysApi::update(
        &pool,
        id,
        payload.parent_id,
        payload.name.trim(),
        payload.permission_code.trim(),
        payload.url.trim(),
        &payload.method.to_uppercase(),
        payload.sort,
        payload.status,
        payload.is_menu,
        payload.description.as_deref(),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("API record not found"))?;

    Ok(ApiResponse::success(api))
}

/// DELETE /admin/sys/apis/:id
pub async fn delete(Path(id): Path<i64>) -> Result<ApiResponse<()>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    if !SysApi::delete(&pool, id).await? {
        return Err(ApiError::not_found("API record not found"));
    }

    Ok(ApiResponse::success(()))
}
