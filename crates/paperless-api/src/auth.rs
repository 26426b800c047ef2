//! Paperless API token authentication.
//!
//! Paperless-ngx uses DRF token auth: `Authorization: Token <token>`.

use reqwest::RequestBuilder;

/// An API token for a Paperless instance.
///
/// The [`Debug`] impl redacts the token to prevent accidental credential
/// exposure in log output.
#[derive(Clone)]
pub struct ApiToken(String);

impl ApiToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Apply the `Authorization: Token ...` header to a request builder.
    #[must_use]
    pub fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("Authorization", format!("Token {}", self.0))
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiToken").field(&"[REDACTED]").finish()
    }
}

impl From<String> for ApiToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}
