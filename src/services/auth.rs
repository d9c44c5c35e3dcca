//! Login orchestration: credentials, roles, permission codes, token.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::auth::{self, password, Claims, JwtError};
use crate::config;
use crate::database::manager::DatabaseError;
use crate::database::models::{user::status, SysRole, User};

#[derive(Debug, Error)]
pub enum AuthError {
    /// Reported identically for unknown usernames and wrong passwords.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("account is disabled or locked")]
    AccountUnavailable,

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Jwt(#[from] JwtError),
}

/// Everything the console needs from a successful login. `api_codes` is the
/// PermissionSet the client persists for the session; the navigation
/// endpoints recompute the same set server-side on every request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    pub user: User,
    pub roles: Vec<SysRole>,
    pub api_codes: Vec<String>,
    pub token: String,
    pub expire: DateTime<Utc>,
    /// End of the grace window after `expire` during which the token may
    /// still be exchanged for a fresh one.
    pub refresh: DateTime<Utc>,
}

pub async fn login(pool: &PgPool, username: &str, plain: &str) -> Result<LoginOutcome, AuthError> {
    let user = User::find_by_username(pool, username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !password::verify_password(plain, &user.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    if user.status != status::ACTIVE {
        return Err(AuthError::AccountUnavailable);
    }

    let roles = SysRole::roles_for_user(pool, user.id).await?;

    let mut api_codes = Vec::new();
    if !roles.is_empty() {
        api_codes = SysRole::permission_codes_for_user(pool, user.id).await?;
    }

    let token = auth::generate_jwt(Claims::new(user.id, user.username.clone()))?;
    let security = &config::config().security;
    let expire = Utc::now() + Duration::hours(security.jwt_expiry_hours as i64);
    let refresh = expire + Duration::hours(security.jwt_refresh_hours as i64);

    User::touch_last_login(pool, user.id).await?;

    info!(user_id = user.id, username = %user.username, "login succeeded");

    Ok(LoginOutcome {
        user,
        roles,
        api_codes,
        token,
        expire,
        refresh,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_outcome_serializes_session_bundle() {
        let now = Utc::now();
        let outcome = LoginOutcome {
            user: User {
                id: 1,
                username: "admin".to_string(),
                password_hash: "salt$hash".to_string(),
                email: None,
                mobile: None,
                department_id: None,
                status: status::ACTIVE,
                last_login_at: None,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            },
            roles: vec![],
            api_codes: vec!["sys.user.list".to_string()],
            token: "token".to_string(),
            expire: now + Duration::hours(12),
            refresh: now + Duration::hours(18),
        };

        let json = serde_json::to_value(&outcome).expect("serializable");
        assert_eq!(json["apiCodes"], serde_json::json!(["sys.user.list"]));
        assert!(json.get("expire").is_some());
        assert!(json.get("refresh").is_some());
        // The hash never leaves the server.
        assert!(json["user"].get("passwordHash").is_none());
    }
}
