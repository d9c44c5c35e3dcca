//! Department management endpoints.
//!
//! Departments are stored flat with `parent_id` links; the tree endpoint
//! folds the flat rows into nested nodes for the console's table/tree view.

use axum::{extract::Path, Json};
use serde::{Deserialize, Serialize};

use crate::database::models::Department;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::ApiResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentNode {
    #[serde(flatten)]
    pub department: Department,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DepartmentNode>,
}

/// Fold flat parent-linked rows into a tree, preserving row order. Rows
/// whose parent is missing (or soft-deleted) surface as roots rather than
/// disappearing.
fn build_tree(rows: Vec<Department>) -> Vec<DepartmentNode> {
    let ids: std::collections::HashSet<i64> = rows.iter().map(|d| d.id).collect();

    let mut children_of: std::collections::HashMap<i64, Vec<Department>> =
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
        node: Department,
        children_of: &mut std::collections::HashMap<i64, Vec<Department>>,
    ) -> DepartmentNode {
        let children = children_of
            .remove(&node.id)
            .unwrap_or_default()
            .into_iter()
            .map(|child| attach(child, children_of))
            .collect();
        DepartmentNode {
            department: node,
            children,
        }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &mut children_of))
        .collect()
}

/// GET /admin/sys/departments — the full department tree.
pub async fn tree() -> Result<ApiResponse<Vec<DepartmentNode>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let rows = Department::list(&pool).await?;
    Ok(ApiResponse::success(build_tree(rows)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentRequest {
    pub parent_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub sort: i32,
}

/// POST /admin/sys/departments
pub async fn create(
    Json(payload): Json<CreateDepartmentRequest>,
) -> Result<ApiResponse<Department>, ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("Department name is required"));
    }

    let pool = DatabaseManager::pool().await?;

    if let Some(parent_id) = payload.parent_id {
        if Department::find_by_id(&pool, parent_id).await?.is_none() {
            return Err(ApiError::bad_request("Parent department does not exist"));
        }
    }

    let department = Department::create(&pool, payload.parent_id, name, payload.sort).await?;

    Ok(ApiResponse::created(department))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentRequest {
    pub parent_id: Option<i64>,
    pub name: String,
    pub sort: i32,
    pub status: bool,
}

/// PUT /admin/sys/departments/:id
pub async fn update(
    Path(id): Path<i64>,
    Json(payload): Json<UpdateDepartmentRequest>,
) -> Result<ApiResponse<Department>, ApiError> {
    if payload.parent_id == Some(id) {
        return Err(ApiError::bad_request("A department cannot be its own parent"));
    }

    let pool = DatabaseManager::pool().await?;

    let department = Department::update(
        &pool,
        id,
        payload.parent_id,
        payload.name.trim(),
        payload.sort,
        payload.status,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Department not found"))?;

    Ok(ApiResponse::success(department))
}

/// DELETE /admin/sys/departments/:id
pub async fn delete(Path(id): Path<i64>) -> Result<ApiResponse<()>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    if Department::has_children(&pool, id).await? {
        return Err(ApiError::conflict(
            "Delete or move child departments first",
        ));
    }

    if !Department::delete(&pool, id).await? {
        return Err(ApiError::not_found("Department not found"));
    }

    Ok(ApiResponse::success(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dept(id: i64, parent_id: Option<i64>, name: &str) -> Department {
        Department {
            id,
            parent_id,
            name: name.to_string(),
            sort: 0,
            status: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn builds_nested_tree_preserving_order() {
        let rows = vec![
            dept(1, None, "HQ"),
            dept(2, Some(1), "Engineering"),
            dept(3, Some(1), "Sales"),
            dept(4, Some(2), "Platform"),
        ];

        let tree = build_tree(rows);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].department.name, "HQ");
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].department.name, "Engineering");
        assert_eq!(tree[0].children[0].children[0].department.name, "Platform");
    }

    #[test]
    fn orphaned_rows_become_roots() {
        let rows = vec![dept(2, Some(99), "Orphan"), dept(1, None, "HQ")];
        let tree = build_tree(rows);
        assert_eq!(tree.len(), 2);
    }
}
