//! CMS articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub author_name: Option<String>,
    /// true = published, false = draft.
    pub status: bool,
    pub is_top: bool,
    pub is_hot: bool,
    pub is_recommend: bool,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Paged listing: keyword matches the title, category and publish
    /// status are exact filters. Pinned articles sort first.
    pub async fn list(
        pool: &PgPool,
        keyword: Option<&str>,
        category_id: Option<i64>,
        status: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Self>, i64), DatabaseError> {
        let pattern = keyword.map(|k| format!("%{}%", k));

        let articles = sqlx::query_as::<_, Article>(
            r#"
            SELECT * FROM cms_articles
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR title ILIKE $1)
              AND ($2::bigint IS NULL OR category_id = $2)
              AND ($3::boolean IS NULL OR status = $3)
            ORDER BY is_top DESC, id DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(pattern.as_deref())
        .bind(category_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM cms_articles
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR title ILIKE $1)
              AND ($2::bigint IS NULL OR category_id = $2)
              AND ($3::boolean IS NULL OR status = $3)
            "#,
        )
        .bind(pattern.as_deref())
        .bind(category_id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok((articles, total))
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, DatabaseError> {
        let article = sqlx::query_as::<_, Article>(
            "SELECT * FROM cms_articles WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(article)
    }

    pub async fn create(
        pool: &PgPool,
        category_id: i64,
        title: &str,
        summary: Option<&str>,
        content: &str,
        author_name: Option<&str>,
    ) -> Result<Self, DatabaseError> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO cms_articles (category_id, title, summary, content, author_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(category_id)
        .bind(title)
        .bind(summary)
        .bind(content)
        .bind(author_name)
        .fetch_one(pool)
        .await?;

        Ok(article)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        id: i64,
        category_id: i64,
        title: &str,
        summary: Option<&str>,
        content: &str,
        author_name: Option<&str>,
    ) -> Result<Option<Self>, DatabaseError> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            UPDATE cms_articles
            SET category_id = $1, title = $2, summary = $3, content = $4,
                author_name = $5, updated_at = now()
            WHERE id = $6 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(category_id)
        .bind(title)
        .bind(summary)
        .bind(content)
        .bind(author_name)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(article)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE cms_articles SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_status(pool: &PgPool, id: i64, value: bool) -> Result<bool, DatabaseError> {
        Self::set_flag(pool, id, "status", value).await
    }

    pub async fn set_top(pool: &PgPool, id: i64, value: bool) -> Result<bool, DatabaseError> {
        Self::set_flag(pool, id, "is_top", value).await
    }

    pub async fn set_hot(pool: &PgPool, id: i64, value: bool) -> Result<bool, DatabaseError> {
        Self::set_flag(pool, id, "is_hot", value).await
    }

    pub async fn set_recommend(pool: &PgPool, id: i64, value: bool) -> Result<bool, DatabaseError> {
        Self::set_flag(pool, id, "is_recommend", value).await
    }

    // `column` is always one of the constants above, never caller input.
    async fn set_flag(
        pool: &PgPool,
        id: i64,
        column: &'static str,
        value: bool,
    ) -> Result<bool, DatabaseError> {
        let sql = format!(
            "UPDATE cms_articles SET {column} = $1, updated_at = now() \
             WHERE id = $2 AND deleted_at IS NULL"
        );
        let result = sqlx::query(&sql).bind(value).bind(id).execute(pool).await?;

        Ok(result.rows_affected() > 0)
    }
}
