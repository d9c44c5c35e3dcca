//! CMS article endpoints.

use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Deserialize;

use crate::database::models::{Article, Category};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::handlers::page_params;
use crate::middleware::{ApiResponse, Page};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub keyword: Option<String>,
    pub category_id: Option<i64>,
    pub status: Option<bool>,
}

/// GET /admin/cms/articles
pub async fn list(Query(query): Query<ListQuery>) -> Result<ApiResponse<Page<Article>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let (page, page_size, offset) = page_params(query.page, query.page_size);

    let (articles, total) = Article::list(
        &pool,
        query.keyword.as_deref().filter(|k| !k.is_empty()),
        query.category_id,
        query.status,
        page_size,
        offset,
    )
    .await?;

    Ok(ApiResponse::success(Page::new(
        articles, total, page, page_size,
    )))
}

/// GET /admin/cms/articles/:id
pub async fn detail(Path(id): Path<i64>) -> Result<ApiResponse<Article>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let article = Article::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Article not found"))?;

    Ok(ApiResponse::success(article))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub category_id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub author_name: Option<String>,
}

/// POST /admin/cms/articles
pub async fn create(
    Json(payload): Json<CreateArticleRequest>,
) -> Result<ApiResponse<Article>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }

    let pool = DatabaseManager::pool().await?;

    if Category::find_by_id(&pool, payload.category_id).await?.is_none() {
        return Err(ApiError::bad_request("Category does not exist"));
    }

    let article = Article::create(
        &pool,
        payload.category_id,
        payload.title.trim(),
        payload.summary.as_deref(),
        &payload.content,
        payload.author_name.as_deref(),
    )
    .await?;

    Ok(ApiResponse::created(article))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    pub category_id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub author_name: Option<String>,
}

/// PUT /admin/cms/articles/:id
pub async fn update(
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArticleRequest>,
) -> Result<ApiResponse<Article>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }

    let pool = DatabaseManager::pool().await?;

    let article = Article::update(
        &pool,
        id,
        payload.category_id,
        payload.title.trim(),
        payload.summary.as_deref(),
        &payload.content,
        payload.author_name.as_deref(),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Article not found"))?;

    Ok(ApiResponse::success(article))
}

/// DELETE /admin/cms/articles/:id
pub async fn delete(Path(id): Path<i64>) -> Result<ApiResponse<()>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    if !Article::delete(&pool, id).await? {
        return Err(ApiError::not_found("Article not found"));
    }

    Ok(ApiResponse::success(()))
}

#[derive(Debug, Deserialize)]
pub struct FlagRequest {
    pub value: bool,
}

/// PUT /admin/cms/articles/:id/status — publish or unpublish.
pub async fn set_status(
    Path(id): Path<i64>,
    Json(payload): Json<FlagRequest>,
) -> Result<ApiResponse<()>, ApiError> {
    apply_flag(Article::set_status(&DatabaseManager::pool().await?, id, payload.value).await?)
}

/// PUT /admin/cms/articles/:id/top
pub async fn set_top(
    Path(id): Path<i64>,
    Json(payload): Json<FlagRequest>,
) -> Result<ApiResponse<()>, ApiError> {
    apply_flag(Article::set_top(&DatabaseManager::pool().await?, id, payload.value).await?)
}

/// PUT /admin/cms/articles/:id/hot
pub async fn set_hot(
    Path(id): Path<i64>,
    Json(payload): Json<FlagRequest>,
) -> Result<ApiResponse<()>, ApiError> {
    apply_flag(Article::set_hot(&DatabaseManager::pool().await?, id, payload.value).await?)
}

/// PUT /admin/cms/articles/:id/recommend
pub async fn set_recommend(
    Path(id): Path<i64>,
    Json(payload): Json<FlagRequest>,
) -> Result<ApiResponse<()>, ApiError> {
    apply_flag(Article::set_recommend(&DatabaseManager::pool().await?, id, payload.value).await?)
}

fn apply_flag(updated: bool) -> Result<ApiResponse<()>, ApiError> {
    if updated {
        Ok(ApiResponse::success(()))
    } else {
        Err(ApiError::not_found("Article not found"))
    }
}
