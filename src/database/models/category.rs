//! CMS categories (content tree, `parent_id` recursion).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    /// URL-friendly identifier, unique among active categories.
    pub slug: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Category {
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, DatabaseError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM cms_categories WHERE deleted_at IS NULL ORDER BY sort_order, id",
        )
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, DatabaseError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT * FROM cms_categories WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(category)
    }

    pub async fn create(
        pool: &PgPool,
        parent_id: Option<i64>,
        name: &str,
        slug: &str,
        description: Option<&str>,
        sort_order: i32,
    ) -> Result<Self, DatabaseError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO cms_categories (parent_id, name, slug, description, sort_order, status)
            VALUES ($1, $2, $3, $4, $5, true)
            RETURNING *
            "#,
        )
        .bind(parent_id)
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(sort_order)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        id: i64,
        parent_id: Option<i64>,
        name: &str,
        slug: &str,
        description: Option<&str>,
        sort_order: i32,
        status: bool,
    ) -> Result<Option<Self>, DatabaseError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE cms_categories
            SET parent_id = $1, name = $2, slug = $3, description = $4,
                sort_order = $5, status = $6, updated_at = now()
            WHERE id = $7 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(parent_id)
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(sort_order)
        .bind(status)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(category)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE cms_categories SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn has_children(pool: &PgPool, id: i64) -> Result<bool, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM cms_categories WHERE parent_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(count > 0)
    }
}
