//! Router assembly.
//!
//! Everything under `/admin` except login sits behind two middleware
//! layers: `jwt_auth_middleware` (validates the Bearer token and inserts
//! [`AuthUser`](crate::middleware::AuthUser)) and `permission_middleware`
//! (resolves the caller's permission codes and enforces endpoint gates).

use axum::{
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::handlers::{protected, public};
use crate::middleware::{jwt_auth_middleware, permission_middleware};

pub fn app() -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/admin/auth/login", post(public::auth::login))
        // Protected API
        .merge(protected_routes());

    if config::config().security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config::config().api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn protected_routes() -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(nav_routes())
        .merge(sys_routes())
        .merge(cms_routes())
        // route_layer keeps the fallback unwrapped so unknown paths still
        // 404; layers run outermost-last: auth first, then permissions.
        .route_layer(from_fn(permission_middleware))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn auth_routes() -> Router {
    use protected::auth;

    Router::new()
        .route("/admin/auth/profile", get(auth::profile))
        .route("/admin/auth/reset-password", post(auth::reset_password))
}

fn nav_routes() -> Router {
    use protected::nav;

    Router::new()
        .route("/admin/nav/menu", get(nav::menu))
        .route("/admin/nav/route-check", get(nav::route_check))
        .route("/admin/nav/active", get(nav::active))
}

fn sys_routes() -> Router {
    use protected::sys::{apis, departments, roles, users};

    Router::new()
        // Users
        .route("/admin/sys/users", get(users::list).post(users::create))
        .route(
            "/admin/sys/users/:id",
            get(users::detail).put(users::update).delete(users::delete),
        )
        .route("/admin/sys/users/:id/roles", put(users::set_roles))
        .route(
            "/admin/sys/users/:id/reset-password",
            put(users::reset_password),
        )
        // Roles
        .route("/admin/sys/roles", get(roles::list).post(roles::create))
        .route(
            "/admin/sys/roles/:id",
            put(roles::update).delete(roles::delete),
        )
        .route(
            "/admin/sys/roles/:id/apis",
            get(roles::apis).put(roles::set_apis),
        )
        // Departments
        .route(
            "/admin/sys/departments",
            get(departments::tree).post(departments::create),
        )
        .route(
            "/admin/sys/departments/:id",
            put(departments::update).delete(departments::delete),
        )
        // API registry
        .route("/admin/sys/apis", get(apis::list).post(apis::create))
        .route(
            "/admin/sys/apis/:id",
            get(apis::detail).put(apis::update).delete(apis::delete),
        )
}

fn cms_routes() -> Router {
    use protected::cms::{articles, categories, site_settings};

    Router::new()
        // Categories
        .route(
            "/admin/cms/categories",
            get(categories::tree).post(categories::create),
        )
        .route(
            "/admin/cms/categories/:id",
            get(categories::detail)
                .put(categories::update)
                .delete(categories::delete),
        )
        // Articles
        .route(
            "/admin/cms/articles",
            get(articles::list).post(articles::create),
        )
        .route(
            "/admin/cms/articles/:id",
            get(articles::detail)
                .put(articles::update)
                .delete(articles::delete),
        )
        .route("/admin/cms/articles/:id/status", put(articles::set_status))
        .route("/admin/cms/articles/:id/top", put(articles::set_top))
        .route("/admin/cms/articles/:id/hot", put(articles::set_hot))
        .route(
            "/admin/cms/articles/:id/recommend",
            put(articles::set_recommend),
        )
        // Site settings
        .route(
            "/admin/cms/site-settings",
            get(site_settings::list).post(site_settings::create),
        )
        .route(
            "/admin/cms/site-settings/:id",
            get(site_settings::detail)
                .put(site_settings::update)
                .delete(site_settings::delete),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Admin Console API",
            "version": version,
            "endpoints": {
                "home": "/ (public)",
                "login": "POST /admin/auth/login (public)",
                "auth": "/admin/auth/* (protected)",
                "nav": "/admin/nav/* (protected)",
                "sys": "/admin/sys/* (protected)",
                "cms": "/admin/cms/* (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
