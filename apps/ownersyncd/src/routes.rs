//! Axum routes: webhook receiver and health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use paperless_ownersync::extract_document_id;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::state::AppState;

/// Build the daemon's router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook/document", post(document_webhook_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Webhook notification body. Paperless webhook integrations post JSON
/// with a `url` field pointing at the changed document.
#[derive(Debug, Deserialize)]
struct WebhookPayload {
    #[serde(default)]
    url: Option<String>,
}

/// `POST /webhook/document` — reconcile the document named in the payload.
async fn document_webhook_handler(
    State(state): State<AppState>,
    Json(payload): Json<WebhookPayload>,
) -> (StatusCode, Json<Value>) {
    let Some(url) = payload.url else {
        warn!("Webhook received without URL field");
        return (
            StatusCode::OK,
            Json(json!({ "status": "ignored", "message": "No URL in payload" })),
        );
    };

    let Some(document_id) = extract_document_id(&url) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid document URL" })),
        );
    };

    info!(document_id, url = %url, "Received webhook for document");

    // Let Paperless finish consuming the document before we read it back.
    tokio::time::sleep(state.settle_delay).await;

    let outcome = state.reconciler.reconcile_document(document_id).await;

    if outcome.is_success() {
        (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "Document processed",
                "document_id": document_id
            })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "error",
                "message": "Failed to process document",
                "document_id": document_id
            })),
        )
    }
}

/// `GET /health` — static liveness payload.
async fn health_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "service": "paperless-owner-sync" })),
    )
}
