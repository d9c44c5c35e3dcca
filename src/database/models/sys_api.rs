//! API permission records.
//!
//! Each row names an endpoint (`method` + `url`), the permission code that
//! gates it, and its place in the permission tree shown by the console
//! (`parent_id`, `is_menu`, `sort`). These rows back both server-side
//! endpoint gating and the permission codes handed to sessions at login.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SysApi {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub permission_code: String,
    pub url: String,
    pub method: String,
    pub sort: i32,
    /// 0 = disabled, 1 = enabled.
    pub status: i32,
    pub is_menu: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SysApi {
    /// All records in tree-assembly order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, DatabaseError> {
        let apis = sqlx::query_as::<_, SysApi>(
            "SELECT * FROM sys_apis WHERE deleted_at IS NULL ORDER BY sort DESC, id DESC",
        )
        .fetch_all(pool)
        .await?;

        Ok(apis)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, DatabaseError> {
        let api = sqlx::query_as::<_, SysApi>(
            "SELECT * FROM sys_apis WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(api)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        parent_id: Option<i64>,
        name: &str,
        permission_code: &str,
        url: &str,
        method: &str,
        sort: i32,
        is_menu: bool,
        description: Option<&str>,
    ) -> Result<Self, DatabaseError> {
        let api = sqlx::query_as::<_, SysApi>(
            r#"
            INSERT INTO sys_apis
                (parent_id, name, permission_code, url, method, sort, status, is_menu, description)
            VALUES ($1, $2, $3, $4, $5, $6, 1, $7, $8)
            RETURNING *
            "#,
        )
        .bind(parent_id)
        .bind(name)
        .bind(permission_code)
        .bind(url)
        .bind(method)
        .bind(sort)
        .bind(is_menu)
        .bind(description)
        .fetch_one(pool)
        .await?;

        Ok(api)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        id: i64,
        parent_id: Option<i64>,
        name: &str,
        permission_code: &str,
        url: &str,
        method: &str,
        sort: i32,
        status: i32,
        is_menu: bool,
        description: Option<&str>,
    ) -> Result<Option<Self>, DatabaseError> {
        let api = sqlx::query_as::<_, SysApi>(
            r#"
            UPDATE sys_apis
            SET parent_id = $1, name = $2, permission_code = $3, url = $4, method = $5,
                sort = $6, status = $7, is_menu = $8, description = $9, updated_at = now()
            WHERE id = $10 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(parent_id)
        .bind(name)
        .bind(permission_code)
        .bind(url)
        .bind(method)
        .bind(sort)
        .bind(status)
        .bind(is_menu)
        .bind(description)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(api)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE sys_apis SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Permission code gating an endpoint, if one is declared for it.
    pub async fn permission_code_for(
        pool: &PgPool,
        method: &str,
        url: &str,
    ) -> Result<Option<String>, DatabaseError> {
        let code = sqlx::query_scalar::<_, String>(
            r#"
            SELECT permission_code FROM sys_apis
            WHERE method = $1 AND url = $2 AND status = 1 AND deleted_at IS NULL
            "#,
        )
        .bind(method)
        .bind(url)
        .fetch_optional(pool)
        .await?;

        Ok(code)
    }
}
