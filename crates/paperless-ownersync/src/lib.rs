//! Owner-to-tag reconciliation for Paperless-ngx.
//!
//! Maps each document's owning user to a derived tag (`owner:alice` by
//! default, or an operator-supplied override) and idempotently ensures the
//! document carries that tag. Reconciliation runs either for a single
//! document (webhook path) or across the whole collection (full sync).

pub mod extract;
pub mod mapping;
pub mod policy;
pub mod reconciler;
pub mod sync;

pub use extract::extract_document_id;
pub use mapping::OwnerTagMapping;
pub use policy::{ResolvedTag, TagPolicy};
pub use reconciler::{ReconcileOutcome, Reconciler};
pub use sync::{SyncEngine, SyncStats};
