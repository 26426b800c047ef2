//! Integration tests for the health endpoint.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::MockServer;

use ownersyncd::routes::app_router;
use ownersyncd::state::AppState;
use paperless_api::{ApiToken, PaperlessClient};
use paperless_ownersync::{OwnerTagMapping, Reconciler, TagPolicy};

async fn test_app() -> axum::Router {
    let server = MockServer::start().await;
    let client = PaperlessClient::with_http_client(
        server.uri(),
        ApiToken::new("test-token"),
        reqwest::Client::new(),
    );
    let reconciler = Reconciler::new(client, TagPolicy::new("owner:", OwnerTagMapping::empty()));
    app_router(AppState::new(reconciler, Duration::ZERO))
}

#[tokio::test]
async fn health_endpoint_returns_200() {
    let response = test_app()
        .await
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_endpoint_reports_service_name() {
    let response = test_app()
        .await
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "paperless-owner-sync");
}
