//! Departments (organizational tree, `parent_id` recursion).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub sort: i32,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Department {
    /// Flat listing in tree-assembly order; handlers fold it into a tree.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, DatabaseError> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT * FROM sys_departments WHERE deleted_at IS NULL ORDER BY sort, id",
        )
        .fetch_all(pool)
        .await?;

        Ok(departments)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, DatabaseError> {
        let department = sqlx::query_as::<_, Department>(
            "SELECT * FROM sys_departments WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(department)
    }

    pub async fn create(
        pool: &PgPool,
        parent_id: Option<i64>,
        name: &str,
        sort: i32,
    ) -> Result<Self, DatabaseError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO sys_departments (parent_id, name, sort, status)
            VALUES ($1, $2, $3, true)
            RETURNING *
            "#,
        )
        .bind(parent_id)
        .bind(name)
        .bind(sort)
        .fetch_one(pool)
        .await?;

        Ok(department)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        parent_id: Option<i64>,
        name: &str,
        sort: i32,
        status: bool,
    ) -> Result<Option<Self>, DatabaseError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            UPDATE sys_departments
            SET parent_id = $1, name = $2, sort = $3, status = $4, updated_at = now()
            WHERE id = $5 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(parent_id)
        .bind(name)
        .bind(sort)
        .bind(status)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(department)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE sys_departments SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// True when any active department points at `id` as its parent.
    pub async fn has_children(pool: &PgPool, id: i64) -> Result<bool, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sys_departments WHERE parent_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(count > 0)
    }
}
