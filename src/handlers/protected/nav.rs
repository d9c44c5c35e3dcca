//! Navigation endpoints: the filtered sidebar tree, deep-link checks, and
//! open-state resolution. All three delegate to the pure functions in
//! [`crate::nav`] with the PermissionSet the permission middleware resolved
//! for this request.

use axum::{extract::Query, Extension};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::nav::{
    self, admin_menu, ancestor_chain, check_route, MenuNode, MenuTree, PermissionSet,
    RouteDecision,
};

/// The static tree is validated once and shared across requests.
static MENU: Lazy<MenuTree> = Lazy::new(admin_menu);

/// GET /admin/nav/menu
pub async fn menu(
    Extension(permissions): Extension<PermissionSet>,
) -> Result<ApiResponse<Vec<MenuNode>>, ApiError> {
    Ok(ApiResponse::success(nav::filter_tree(&MENU, &permissions)))
}

#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub path: String,
}

/// GET /admin/nav/route-check?path=/permission/user
pub async fn route_check(
    Query(query): Query<PathQuery>,
    Extension(permissions): Extension<PermissionSet>,
) -> Result<ApiResponse<RouteDecision>, ApiError> {
    Ok(ApiResponse::success(check_route(
        &MENU,
        &query.path,
        &permissions,
    )))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveState {
    /// Keys of the sections the sidebar should open, outermost first.
    pub open_keys: Vec<String>,
}

/// GET /admin/nav/active?path=/permission/user
pub async fn active(Query(query): Query<PathQuery>) -> Result<ApiResponse<ActiveState>, ApiError> {
    let open_keys = ancestor_chain(&MENU, &query.path)
        .into_iter()
        .map(|node| node.key.clone())
        .collect();

    Ok(ApiResponse::success(ActiveState { open_keys }))
}
