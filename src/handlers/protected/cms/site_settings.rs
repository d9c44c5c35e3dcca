//! Site setting endpoints (typed key/value records).

use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Deserialize;

use crate::database::models::SiteSetting;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::ApiResponse;

const VALUE_TYPES: &[&str] = &["string", "number", "boolean", "json"];

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub group: Option<String>,
}

/// GET /admin/cms/site-settings[?group=]
pub async fn list(Query(query): Query<ListQuery>) -> Result<ApiResponse<Vec<SiteSetting>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let settings = SiteSetting::list(
        &pool,
        query.group.as_deref().filter(|g| !g.is_empty()),
    )
    .await?;

    Ok(ApiResponse::success(settings))
}

/// GET /admin/cms/site-settings/:id
pub async fn detail(Path(id): Path<i64>) -> Result<ApiResponse<SiteSetting>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let setting = SiteSetting::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Setting not found"))?;

    Ok(ApiResponse::success(setting))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSettingRequest {
    pub setting_key: String,
    pub setting_value: String,
    pub value_type: String,
    pub setting_group: String,
    pub description: Option<String>,
}

/// POST /admin/cms/site-settings
pub async fn create(
    Json(payload): Json<CreateSettingRequest>,
) -> Result<ApiResponse<SiteSetting>, ApiError> {
    let key = payload.setting_key.trim();
    if key.is_empty() {
        return Err(ApiError::bad_request("Setting key is required"));
    }
    if !VALUE_TYPES.contains(&payload.value_type.as_str()) {
        return Err(ApiError::bad_request(
            "Value type must be one of: string, number, boolean, json",
        ));
    }

    let pool = DatabaseManager::pool().await?;

    if SiteSetting::find_by_key(&pool, key).await?.is_some() {
        return Err(ApiError::conflict("A setting with this key already exists"));
    }

    let setting = SiteSetting::create(
        &pool,
        key,
        &payload.setting_value,
        &payload.value_type,
        payload.setting_group.trim(),
        payload.description.as_deref(),
    )
    .await?;

    Ok(ApiResponse::created(setting))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingRequest {
    pub setting_value: String,
    pub value_type: String,
    pub setting_group: String,
    pub description: Option<String>,
}

/// PUT /admin/cms/site-settings/:id
pub async fn update(
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSettingRequest>,
) -> Result<ApiResponse<SiteSetting>, ApiError> {
    if !VALUE_TYPES.contains(&payload.value_type.as_str()) {
        return Err(ApiError::bad_request(
            "Value type must be one of: string, number, boolean, json",
        ));
    }

    let pool = DatabaseManager::pool().await?;

    let setting = SiteSetting::update(
        &pool,
        id,
        &payload.setting_value,
        &payload.value_type,
        payload.setting_group.trim(),
        payload.description.as_deref(),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Setting not found"))?;

    Ok(ApiResponse::success(setting))
}

/// DELETE /admin/cms/site-settings/:id
pub async fn delete(Path(id): Path<i64>) -> Result<ApiResponse<()>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    if !SiteSetting::delete(&pool, id).await? {
        return Err(ApiError::not_found("Setting not found"));
    }

    Ok(ApiResponse::success(()))
}
