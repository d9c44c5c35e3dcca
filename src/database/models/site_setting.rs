//! Site settings (typed key/value records, grouped for the console UI).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SiteSetting {
    pub id: i64,
    pub setting_key: String,
    pub setting_value: String,
    /// How the console should interpret the value: "string", "number",
    /// "boolean" or "json".
    pub value_type: String,
    pub setting_group: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SiteSetting {
    pub async fn list(pool: &PgPool, group: Option<&str>) -> Result<Vec<Self>, DatabaseError> {
        let settings = sqlx::query_as::<_, SiteSetting>(
            r#"
            SELECT * FROM cms_site_settings
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR setting_group = $1)
            ORDER BY setting_group, setting_key
            "#,
        )
        .bind(group)
        .fetch_all(pool)
        .await?;

        Ok(settings)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, DatabaseError> {
        let setting = sqlx::query_as::<_, SiteSetting>(
            "SELECT * FROM cms_site_settings WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(setting)
    }

    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<Self>, DatabaseError> {
        let setting = sqlx::query_as::<_, SiteSetting>(
            "SELECT * FROM cms_site_settings WHERE setting_key = $1 AND deleted_at IS NULL",
        )
        .bind(key)
        .fetch_optional(pool)
        .await?;

        Ok(setting)
    }

    pub async fn create(
        pool: &PgPool,
        setting_key: &str,
        setting_value: &str,
        value_type: &str,
        setting_group: &str,
        description: Option<&str>,
    ) -> Result<Self, DatabaseError> {
        let setting = sqlx::query_as::<_, SiteSetting>(
            r#"
            INSERT INTO cms_site_settings
                (setting_key, setting_value, value_type, setting_group, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(setting_key)
        .bind(setting_value)
        .bind(value_type)
        .bind(setting_group)
        .bind(description)
        .fetch_one(pool)
        .await?;

        Ok(setting)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        setting_value: &str,
        value_type: &str,
        setting_group: &str,
        description: Option<&str>,
    ) -> Result<Option<Self>, DatabaseError> {
        let setting = sqlx::query_as::<_, SiteSetting>(
            r#"
            UPDATE cms_site_settings
            SET setting_value = $1, value_type = $2, setting_group = $3,
                description = $4, updated_at = now()
            WHERE id = $5 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(setting_value)
        .bind(value_type)
        .bind(setting_group)
        .bind(description)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(setting)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE cms_site_settings SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
