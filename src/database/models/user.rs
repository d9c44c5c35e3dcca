//! Console user accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;

/// Account status values stored in `users.status`.
pub mod status {
    pub const DISABLED: i32 = 0;
    pub const ACTIVE: i32 = 1;
    pub const LOCKED: i32 = 2;
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub department_id: Option<i64>,
    pub status: i32,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = $1 AND deleted_at IS NULL",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Paged listing with optional keyword (username/email), department and
    /// status filters. Returns the page plus the total row count.
    pub async fn list(
        pool: &PgPool,
        keyword: Option<&str>,
        department_id: Option<i64>,
        status: Option<i32>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Self>, i64), DatabaseError> {
        let pattern = keyword.map(|k| format!("%{}%", k));

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR username ILIKE $1 OR email ILIKE $1)
              AND ($2::bigint IS NULL OR department_id = $2)
              AND ($3::int IS NULL OR status = $3)
            ORDER BY id DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(pattern.as_deref())
        .bind(department_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM users
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR username ILIKE $1 OR email ILIKE $1)
              AND ($2::bigint IS NULL OR department_id = $2)
              AND ($3::int IS NULL OR status = $3)
            "#,
        )
        .bind(pattern.as_deref())
        .bind(department_id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok((users, total))
    }

    pub async fn create(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
        email: Option<&str>,
        mobile: Option<&str>,
        department_id: Option<i64>,
    ) -> Result<Self, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, email, mobile, department_id, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .bind(mobile)
        .bind(department_id)
        .bind(status::ACTIVE)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        email: Option<&str>,
        mobile: Option<&str>,
        department_id: Option<i64>,
        status: i32,
    ) -> Result<Option<Self>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $1, mobile = $2, department_id = $3, status = $4, updated_at = now()
            WHERE id = $5 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(mobile)
        .bind(department_id)
        .bind(status)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn set_password(
        pool: &PgPool,
        id: i64,
        password_hash: &str,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $1, updated_at = now() WHERE id = $2 AND deleted_at IS NULL",
        )
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn touch_last_login(pool: &PgPool, id: i64) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE users SET last_login_at = now() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Soft delete; the row stays for audit but drops out of every query.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
