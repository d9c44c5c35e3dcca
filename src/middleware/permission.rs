//! Endpoint permission gating.
//!
//! Runs after JWT auth. Resolves the caller's permission codes once per
//! request, stores them as an extension for handlers that need them (the
//! navigation endpoints), then checks the method and matched route pattern
//! (`/admin/sys/users/:id`, not the literal request path) against the
//! `sys_apis` registry: if a permission code is declared for the endpoint
//! and the caller does not hold it, the request is denied with 403.
//!
//! Endpoints with no registry row are not blocked here; like the route
//! guard, this layer only enforces declared gates. Routes that should be
//! reachable by any authenticated user are listed in
//! `security.login_only_routes`.

use axum::{
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use crate::config;
use crate::database::models::SysApi;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::services::permission::permissions_for_user;

pub async fn permission_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(auth_user) = request.extensions().get::<AuthUser>().cloned() else {
        // Layered inside jwt_auth_middleware; a missing extension means a
        // wiring bug, not a client error.
        tracing::error!("permission middleware ran without AuthUser extension");
        return Err(error_response(ApiError::internal_server_error(
            "Authentication context missing",
        )));
    };

    let method = request.method().as_str().to_owned();
    let path = route_path(&request);

    let pool = DatabaseManager::pool()
        .await
        .map_err(|e| error_response(e.into()))?;

    let permissions = permissions_for_user(&pool, auth_user.user_id)
        .await
        .map_err(|e| error_response(e.into()))?;

    if !is_login_only(&method, &path) {
        let declared = SysApi::permission_code_for(&pool, &method, &path)
            .await
            .map_err(|e| error_response(e.into()))?;

        if let Some(code) = declared {
            if !permissions.contains(&code) {
                tracing::warn!(
                    user_id = auth_user.user_id,
                    %method,
                    %path,
                    required = %code,
                    "permission denied"
                );
                return Err(error_response(ApiError::forbidden(
                    "You do not have permission to access this resource",
                )));
            }
        }
    }

    request.extensions_mut().insert(permissions);
    Ok(next.run(request).await)
}

/// The route pattern the router matched, so parameterized endpoints gate on
/// their registered shape rather than the per-request path. Falls back to
/// the literal path when no pattern is available.
fn route_path(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned())
}

fn is_login_only(method: &str, path: &str) -> bool {
    let entry = format!("{} {}", method, path);
    config::config()
        .security
        .login_only_routes
        .iter()
        .any(|route| route == &entry)
}

fn error_response(err: ApiError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err.to_json())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware::from_fn, routing::put, Router};
    use tower::ServiceExt;

    // Short-circuits and reports what the gate would look up.
    async fn echo_route_path(request: Request, _next: Next) -> Response {
        Response::builder()
            .header("x-route", route_path(&request))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn parameterized_request_resolves_to_route_pattern() {
        let app = Router::new()
            .route("/admin/sys/users/:id", put(|| async {}))
            .route_layer(from_fn(echo_route_path));

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/admin/sys/users/5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-route"], "/admin/sys/users/:id");
    }

    #[test]
    fn literal_path_used_without_a_matched_route() {
        let request = Request::builder()
            .uri("/somewhere/else?x=1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(route_path(&request), "/somewhere/else");
    }
}
