//! Typed async client for the Paperless-ngx REST API.
//!
//! Covers the document, tag, and user endpoints with token authentication
//! and cursor pagination.  No business logic lives here; callers decide
//! what to do with the resources this crate fetches.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

pub use auth::ApiToken;
pub use client::PaperlessClient;
pub use error::{ApiError, ApiResult};
pub use models::{Document, DocumentTagsPatch, NewTag, Page, Tag, User};
