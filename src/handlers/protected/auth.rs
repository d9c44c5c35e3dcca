//! Session endpoints for the logged-in user.

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::auth::password;
use crate::database::models::{SysRole, User};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, AuthUser};
use crate::nav::PermissionSet;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user: User,
    pub roles: Vec<SysRole>,
    pub api_codes: Vec<String>,
}

/// GET /admin/auth/profile
pub async fn profile(
    Extension(auth_user): Extension<AuthUser>,
    Extension(permissions): Extension<PermissionSet>,
) -> Result<ApiResponse<Profile>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let user = User::find_by_id(&pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User no longer exists"))?;

    let roles = SysRole::roles_for_user(&pool, user.id).await?;

    let mut api_codes: Vec<String> = permissions.iter().map(str::to_owned).collect();
    api_codes.sort();

    Ok(ApiResponse::success(Profile {
        user,
        roles,
        api_codes,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// POST /admin/auth/reset-password
pub async fn reset_password(
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<ApiResponse<()>, ApiError> {
    if payload.new_password.len() < 6 {
        return Err(ApiError::bad_request(
            "New password must be at least 6 characters",
        ));
    }

    let pool = DatabaseManager::pool().await?;

    let user = User::find_by_id(&pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User no longer exists"))?;

    if !password::verify_password(&payload.old_password, &user.password_hash) {
        return Err(ApiError::unauthorized("Old password is incorrect"));
    }

    User::set_password(&pool, user.id, &password::hash_password(&payload.new_password)).await?;

    Ok(ApiResponse::success(()))
}
