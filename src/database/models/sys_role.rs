//! Roles and their grants: user assignments and API permissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SysRole {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub sort: i32,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SysRole {
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, DatabaseError> {
        let roles = sqlx::query_as::<_, SysRole>(
            "SELECT * FROM sys_roles WHERE deleted_at IS NULL ORDER BY sort, id",
        )
        .fetch_all(pool)
        .await?;

        Ok(roles)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, DatabaseError> {
        let role = sqlx::query_as::<_, SysRole>(
            "SELECT * FROM sys_roles WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(role)
    }

    pub async fn create(
        pool: &PgPool,
        name: &str,
        description: Option<&str>,
        sort: i32,
    ) -> Result<Self, DatabaseError> {
        let role = sqlx::query_as::<_, SysRole>(
            r#"
            INSERT INTO sys_roles (name, description, sort, status)
            VALUES ($1, $2, $3, true)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(sort)
        .fetch_one(pool)
        .await?;

        Ok(role)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        name: &str,
        description: Option<&str>,
        sort: i32,
        status: bool,
    ) -> Result<Option<Self>, DatabaseError> {
        let role = sqlx::query_as::<_, SysRole>(
            r#"
            UPDATE sys_roles
            SET name = $1, description = $2, sort = $3, status = $4, updated_at = now()
            WHERE id = $5 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(sort)
        .bind(status)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(role)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE sys_roles SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Enabled roles assigned to a user.
    pub async fn roles_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, DatabaseError> {
        let roles = sqlx::query_as::<_, SysRole>(
            r#"
            SELECT r.* FROM sys_roles r
            JOIN sys_user_roles ur ON r.id = ur.role_id
            WHERE ur.user_id = $1 AND r.status = true AND r.deleted_at IS NULL
            ORDER BY r.sort, r.id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(roles)
    }

    /// Replace a user's role assignments.
    pub async fn set_user_roles(
        pool: &PgPool,
        user_id: i64,
        role_ids: &[i64],
    ) -> Result<(), DatabaseError> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM sys_user_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for role_id in role_ids {
            sqlx::query(
                "INSERT INTO sys_user_roles (user_id, role_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(user_id)
            .bind(role_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// API ids granted to a role.
    pub async fn api_ids_for_role(pool: &PgPool, role_id: i64) -> Result<Vec<i64>, DatabaseError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT api_id FROM sys_role_apis WHERE role_id = $1 ORDER BY api_id",
        )
        .bind(role_id)
        .fetch_all(pool)
        .await?;

        Ok(ids)
    }

    /// Replace a role's API grants.
    pub async fn set_role_apis(
        pool: &PgPool,
        role_id: i64,
        api_ids: &[i64],
    ) -> Result<(), DatabaseError> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM sys_role_apis WHERE role_id = $1")
            .bind(role_id)
            .execute(&mut *tx)
            .await?;

        for api_id in api_ids {
            sqlx::query(
                "INSERT INTO sys_role_apis (role_id, api_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(role_id)
            .bind(api_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Distinct permission codes granted to a user through enabled roles and
    /// enabled API records. This is the session's PermissionSet source.
    pub async fn permission_codes_for_user(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Vec<String>, DatabaseError> {
        let codes = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT a.permission_code
            FROM sys_apis a
            JOIN sys_role_apis ra ON a.id = ra.api_id
            JOIN sys_user_roles ur ON ra.role_id = ur.role_id
            JOIN sys_roles r ON r.id = ur.role_id
            WHERE ur.user_id = $1
              AND a.status = 1 AND a.deleted_at IS NULL
              AND r.status = true AND r.deleted_at IS NULL
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(codes)
    }
}
