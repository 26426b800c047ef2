//! Paperless-ngx HTTP client (reqwest-based).

use crate::auth::ApiToken;
use crate::error::{ApiError, ApiResult};
use crate::models::{Document, DocumentTagsPatch, NewTag, Page, Tag, User};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default request timeout for API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Async client for a single Paperless-ngx instance.
///
/// Wraps `reqwest::Client` with token authentication, pagination, and
/// error mapping. Cloning is cheap; the underlying connection pool is
/// shared.
#[derive(Debug, Clone)]
pub struct PaperlessClient {
    /// Base URL of the instance (e.g. `https://paperless.example.com`),
    /// stored without a trailing slash.
    base_url: String,
    token: ApiToken,
    http_client: Client,
}

impl PaperlessClient {
    /// Create a new client with a default HTTP client configuration.
    pub fn new(base_url: impl Into<String>, token: ApiToken) -> ApiResult<Self> {
        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("paperless-owner-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_http_client(base_url, token, http_client))
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(
        base_url: impl Into<String>,
        token: ApiToken,
        http_client: Client,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            http_client,
        }
    }

    /// Base URL of the instance, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe connectivity and credentials by fetching the first users page.
    pub async fn check_connection(&self) -> ApiResult<()> {
        let url = format!("{}/api/users/", self.base_url);
        let _: Page<User> = self.get(&url).await?;
        Ok(())
    }

    // ── Documents ─────────────────────────────────────────────────────

    /// Fetch a single document (GET /api/documents/{id}/).
    pub async fn get_document(&self, id: u64) -> ApiResult<Document> {
        let url = format!("{}/api/documents/{}/", self.base_url, id);
        self.get(&url).await
    }

    /// Fetch one page of documents.
    ///
    /// Pass `None` for the first page; thereafter pass the `next` URL from
    /// the previous page. Callers drive pagination themselves so large
    /// collections can be consumed page by page.
    pub async fn documents_page(&self, cursor: Option<&str>) -> ApiResult<Page<Document>> {
        let first = format!("{}/api/documents/", self.base_url);
        let url = cursor.unwrap_or(&first);
        self.get(url).await
    }

    /// Replace a document's tag list (PATCH /api/documents/{id}/).
    ///
    /// Paperless treats the body as a full replacement of the tag set, so
    /// callers must include every tag id the document should keep.
    pub async fn update_document_tags(&self, id: u64, tag_ids: Vec<u64>) -> ApiResult<()> {
        let url = format!("{}/api/documents/{}/", self.base_url, id);
        debug!(document_id = id, "PATCH {}", url);
        let body = DocumentTagsPatch { tags: tag_ids };
        let builder = self.token.apply(self.http_client.patch(&url));
        let response = builder.json(&body).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            self.handle_error_response(response).await
        }
    }

    // ── Users ─────────────────────────────────────────────────────────

    /// Fetch every user, following the pagination cursor to exhaustion.
    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.list_all(&format!("{}/api/users/", self.base_url)).await
    }

    // ── Tags ──────────────────────────────────────────────────────────

    /// Fetch every tag, following the pagination cursor to exhaustion.
    pub async fn list_tags(&self) -> ApiResult<Vec<Tag>> {
        self.list_all(&format!("{}/api/tags/", self.base_url)).await
    }

    /// Create a tag (POST /api/tags/).
    pub async fn create_tag(&self, tag: &NewTag) -> ApiResult<Tag> {
        let url = format!("{}/api/tags/", self.base_url);
        debug!(name = %tag.name, "POST {}", url);
        let builder = self.token.apply(self.http_client.post(&url));
        let response = builder.json(tag).send().await?;
        self.handle_response(response).await
    }

    // ── Internal HTTP helpers ─────────────────────────────────────────

    /// Follow a list endpoint's `next` cursor until exhausted.
    async fn list_all<T: DeserializeOwned>(&self, first_url: &str) -> ApiResult<Vec<T>> {
        let mut results = Vec::new();
        let mut next = Some(first_url.to_string());

        while let Some(url) = next {
            let page: Page<T> = self.get(&url).await?;
            results.extend(page.results);
            next = page.next;
        }

        Ok(results)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {}", url);
        let builder = self.token.apply(self.http_client.get(url));
        let response = builder.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| ApiError::Parse(format!("failed to decode response: {e}")))
        } else {
            self.handle_error_response(response).await
        }
    }

    async fn handle_error_response<T>(&self, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());

        match status {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(body)),
            _ => {
                let detail = if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body
                };
                Err(ApiError::Status {
                    status: status.as_u16(),
                    detail,
                })
            }
        }
    }
}
