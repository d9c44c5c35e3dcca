//! In-process checks of the HTTP surface: public endpoints respond and the
//! authentication layer rejects unauthenticated access before any handler
//! runs. No database is required for these paths.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use admin_console_api::routes::app;

#[tokio::test]
async fn root_responds_ok() -> Result<()> {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn unknown_path_is_404() -> Result<()> {
    let response = app()
        .oneshot(Request::builder().uri("/no/such/route").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unknown_admin_path_is_404_not_401() -> Result<()> {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/admin/sys/not-a-resource")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn protected_route_without_token_is_401() -> Result<()> {
    let response = app()
        .oneshot(Request::builder().uri("/admin/nav/menu").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn garbage_bearer_token_is_401() -> Result<()> {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/admin/sys/users")
                .header("authorization", "Bearer not-a-jwt")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn non_bearer_authorization_is_401() -> Result<()> {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/admin/cms/articles")
                .header("authorization", "Basic dXNlcjpwYXNz")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn login_rejects_wrong_method() -> Result<()> {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/admin/auth/login")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}
