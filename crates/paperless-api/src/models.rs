//! Wire types for the Paperless-ngx REST API.

use serde::{Deserialize, Serialize};

/// A document as returned by `GET /api/documents/{id}/`.
///
/// Only the fields this system reads are modelled; Paperless returns many
/// more, which serde ignores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// Owning user id, absent for unowned documents.
    #[serde(default)]
    pub owner: Option<u64>,
    /// Current tag ids. Paperless treats this as a set; order is not
    /// meaningful.
    #[serde(default)]
    pub tags: Vec<u64>,
}

/// A user account from `GET /api/users/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
}

/// A tag from `GET /api/tags/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub is_inbox_tag: bool,
}

/// Body for `POST /api/tags/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTag {
    pub name: String,
    pub color: String,
    pub is_inbox_tag: bool,
}

impl NewTag {
    /// Default color Paperless shows for auto-generated owner tags.
    pub const DEFAULT_COLOR: &'static str = "#007bff";

    /// A non-inbox tag with the default color.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Self::DEFAULT_COLOR.to_string(),
            is_inbox_tag: false,
        }
    }
}

/// Body for `PATCH /api/documents/{id}/` — full replacement tag list.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentTagsPatch {
    pub tags: Vec<u64>,
}

/// Paginated list envelope used by every Paperless list endpoint.
///
/// `next` is a complete URL for the following page, or absent on the last
/// page.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<T>,
}
