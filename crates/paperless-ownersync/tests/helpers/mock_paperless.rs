//! Mock Paperless-ngx server using wiremock for integration testing.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paperless_api::{ApiToken, PaperlessClient};
use paperless_ownersync::{OwnerTagMapping, Reconciler, TagPolicy};

/// A mock Paperless instance with helpers for the endpoints the sync uses.
pub struct MockPaperless {
    server: MockServer,
}

impl MockPaperless {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Create a client configured to talk to this mock instance.
    pub fn client(&self) -> PaperlessClient {
        PaperlessClient::with_http_client(
            self.uri(),
            ApiToken::new("test-token-123"),
            reqwest::Client::new(),
        )
    }

    /// Create a reconciler with the given prefix and mapping entries.
    pub fn reconciler(&self, prefix: &str, mapping: &[(&str, &str)]) -> Reconciler {
        let mapping = OwnerTagMapping::from_entries(
            mapping
                .iter()
                .map(|(user, tag)| (user.to_string(), tag.to_string())),
        );
        Reconciler::new(self.client(), TagPolicy::new(prefix, mapping))
    }

    /// Mount a single-page users listing.
    pub async fn mock_users(&self, users: &[(u64, &str)]) {
        let results: Vec<Value> = users
            .iter()
            .map(|(id, username)| json!({ "id": id, "username": username }))
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/users/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": results.len(),
                "next": null,
                "results": results
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a single-page tags listing.
    pub async fn mock_tags(&self, tags: &[(u64, &str)]) {
        let results: Vec<Value> = tags
            .iter()
            .map(|(id, name)| {
                json!({ "id": id, "name": name, "color": "#007bff", "is_inbox_tag": false })
            })
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/tags/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": results.len(),
                "next": null,
                "results": results
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a single document fetch.
    pub async fn mock_document(&self, id: u64, title: &str, owner: Option<u64>, tags: &[u64]) {
        Mock::given(method("GET"))
            .and(path(format!("/api/documents/{id}/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "title": title,
                "owner": owner,
                "tags": tags
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a single-page documents listing.
    pub async fn mock_documents_single_page(&self, documents: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path("/api/documents/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": documents.len(),
                "next": null,
                "results": documents
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a two-page documents listing paginated via `next`.
    ///
    /// The second page is keyed on `?page=2`, so it must be consulted
    /// before the unqualified first-page mock; wiremock checks mocks in
    /// mount order, and this method mounts the specific one first.
    pub async fn mock_documents_two_pages(&self, page_one: Vec<Value>, page_two: Vec<Value>) {
        let total = page_one.len() + page_two.len();

        Mock::given(method("GET"))
            .and(path("/api/documents/"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": total,
                "next": null,
                "results": page_two
            })))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/documents/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": total,
                "next": format!("{}/api/documents/?page=2", self.uri()),
                "results": page_one
            })))
            .mount(&self.server)
            .await;
    }

    /// Expect exactly one tag creation, answering with the given id.
    pub async fn expect_create_tag(&self, name: &str, id: u64) {
        Mock::given(method("POST"))
            .and(path("/api/tags/"))
            .and(body_json(json!({
                "name": name,
                "color": "#007bff",
                "is_inbox_tag": false
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": id,
                "name": name,
                "color": "#007bff",
                "is_inbox_tag": false
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Fail the test if any tag creation is attempted.
    pub async fn expect_no_tag_creation(&self) {
        Mock::given(method("POST"))
            .and(path("/api/tags/"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Expect exactly one tag-list PATCH with the given full list.
    pub async fn expect_patch_tags(&self, document_id: u64, tags: &[u64]) {
        Mock::given(method("PATCH"))
            .and(path(format!("/api/documents/{document_id}/")))
            .and(body_json(json!({ "tags": tags })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": document_id,
                "title": "patched",
                "owner": null,
                "tags": tags
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Fail the test if any document update is attempted.
    pub async fn expect_no_document_updates(&self) {
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }
}

/// JSON body for a document inside a list page.
pub fn document_json(id: u64, title: &str, owner: Option<u64>, tags: &[u64]) -> Value {
    json!({ "id": id, "title": title, "owner": owner, "tags": tags })
}
