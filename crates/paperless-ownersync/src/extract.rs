//! Document-id extraction from webhook notification URLs.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Path form: `.../documents/55` or `.../documents/55/`, end-anchored.
static DOC_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/documents/(\d+)/?$").expect("valid regex"));

/// Query form: `...?document_id=55`.
static DOC_QUERY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"document_id=(\d+)").expect("valid regex"));

/// Extract a document id from a Paperless document URL.
///
/// The path pattern takes precedence over the query-parameter pattern.
/// Returns `None` (with a warning logged) when neither matches or the
/// captured digits do not fit a `u64`.
#[must_use]
pub fn extract_document_id(url: &str) -> Option<u64> {
    let capture = DOC_PATH_RE
        .captures(url)
        .or_else(|| DOC_QUERY_RE.captures(url))
        .and_then(|c| c.get(1));

    match capture {
        Some(digits) => match digits.as_str().parse::<u64>() {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(url, error = %e, "Document id in URL is not a valid integer");
                None
            }
        },
        None => {
            warn!(url, "Could not extract document id from URL");
            None
        }
    }
}
