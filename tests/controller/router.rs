use axum::{body::Body, http::Request};
use mimir::server::router::routes;
use tower::ServiceExt;

use super::*;

/// Expect lookup routes to be mounted under /api
#[tokio::test]
async fn routes_lookup_requests() -> Result<(), TestError> {
    let test = TestBuilder::new().with_reply_tables().build().await?;
    let app = routes().with_state(test.into_app_state());

    let request = Request::builder()
        .uri("/api/player/no")
        .body(Body::empty())
        .expect("request should build");
    let resp = app.oneshot(request).await.expect("router is infallible");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect the invalidation route to accept DELETE
#[tokio::test]
async fn routes_invalidation_requests() -> Result<(), TestError> {
    let test = TestBuilder::new().with_reply_tables().build().await?;
    let app = routes().with_state(test.into_app_state());

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/identity/{}/name", Uuid::new_v4()))
        .body(Body::empty())
        .expect("request should build");
    let resp = app.oneshot(request).await.expect("router is infallible");

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    Ok(())
}

/// Expect the OpenAPI document to be served
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let app = routes().with_state(test.into_app_state());

    let request = Request::builder()
        .uri("/api/docs/openapi.json")
        .body(Body::empty())
        .expect("request should build");
    let resp = app.oneshot(request).await.expect("router is infallible");

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}
