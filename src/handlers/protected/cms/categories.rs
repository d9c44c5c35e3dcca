//! CMS category endpoints.

use axum::{extract::Path, Json};
use serde::{Deserialize, Serialize};

use crate::database::models::Category;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::ApiResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,
}

fn build_tree(rows: Vec<Category>) -> Vec<CategoryNode> {
    let ids: std::collections::HashSet<i64> = rows.iter().map(|c| c.id).collect();

    let mut children_of: std::collections::HashMap<i64, Vec<Category>> =
        std::collections::HashMap::new();
    let mut roots = Vec::new();

    for row in rows {
        match row.parent_id {
            Some(parent) if ids.contains(&parent) => {
                children_of.entry(parent).or_default().push(row);
            }
            _ => roots.push(row),
        }
    }

    fn attach(
        node: Category,
        children_of: &mut std::collections::HashMap<i64, Vec<Category>>,
    ) -> CategoryNode {
        let children = children_of
            .remove(&node.id)
            .unwrap_or_default()
            .into_iter()
            .map(|child| attach(child, children_of))
            .collect();
        CategoryNode {
            category: node,
            children,
        }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &mut children_of))
        .collect()
}

/// GET /admin/cms/categories — the full category tree.
pub async fn tree() -> Result<ApiResponse<Vec<CategoryNode>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    Ok(ApiResponse::success(build_tree(Category::list(&pool).await?)))
}

/// GET /admin/cms/categories/:id
pub async fn detail(Path(id): Path<i64>) -> Result<ApiResponse<Category>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let category = Category::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(ApiResponse::success(category))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub parent_id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// POST /admin/cms/categories
pub async fn create(
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<ApiResponse<Category>, ApiError> {
    if payload.name.trim().is_empty() || payload.slug.trim().is_empty() {
        return Err(ApiError::bad_request("Name and slug are required"));
    }

    let pool = DatabaseManager::pool().await?;

    if let Some(parent_id) = payload.parent_id {
        if Category::find_by_id(&pool, parent_id).await?.is_none() {
            return Err(ApiError::bad_request("Parent category does not exist"));
        }
    }

    let category = Category::create(
        &pool,
        payload.parent_id,
        payload.name.trim(),
        payload.slug.trim(),
        payload.description.as_deref(),
        payload.sort_order,
    )
    .await?;

    Ok(ApiResponse::created(category))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub parent_id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub status: bool,
}

/// PUT /admin/cms/categories/:id
pub async fn update(
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<ApiResponse<Category>, ApiError> {
    if payload.parent_id == Some(id) {
        return Err(ApiError::bad_request("A category cannot be its own parent"));
    }

    let pool = DatabaseManager::pool().await?;

    let category = Category::update(
        &pool,
        id,
        payload.parent_id,
        payload.name.trim(),
        payload.slug.trim(),
        payload.description.as_deref(),
        payload.sort_order,
        payload.status,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(ApiResponse::success(category))
}

/// DELETE /admin/cms/categories/:id
pub async fn delete(Path(id): Path<i64>) -> Result<ApiResponse<()>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    if Category::has_children(&pool, id).await? {
        return Err(ApiError::conflict("Delete or move child categories first"));
    }

    if !Category::delete(&pool, id).await? {
        return Err(ApiError::not_found("Category not found"));
    }

    Ok(ApiResponse::success(()))
}
