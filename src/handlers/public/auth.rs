//! Public authentication endpoints.

use axum::Json;
use serde::Deserialize;

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::services::{self, LoginOutcome};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /admin/auth/login
///
/// Verifies credentials and returns the session bundle: user, roles, the
/// distinct permission codes of the user's granted APIs (`apiCodes`, the
/// console's PermissionSet), and a bearer token.
pub async fn login(
    Json(payload): Json<LoginRequest>,
) -> Result<ApiResponse<LoginOutcome>, ApiError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let pool = DatabaseManager::pool().await?;
    let outcome = services::login(&pool, payload.username.trim(), &payload.password).await?;

    Ok(ApiResponse::success(outcome))
}
