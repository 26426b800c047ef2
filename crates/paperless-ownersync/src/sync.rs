//! Full-collection reconciliation (batch sync).

use std::time::Duration;
use tracing::{error, info};

use crate::reconciler::{tag_directory, user_directory, ReconcileOutcome, Reconciler};

/// Pause between successive API mutations and page fetches, to avoid
/// hammering the remote instance during a batch pass.
const INTER_REQUEST_DELAY: Duration = Duration::from_millis(100);

/// Aggregated counters from one full sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SyncStats {
    /// Documents the instance reported in total.
    pub total: u64,
    /// Documents examined this pass.
    pub processed: u64,
    /// No-op, already-tagged, and successfully updated documents.
    pub succeeded: u64,
    /// Mapped-tag-missing, tag-create, and update failures.
    pub failed: u64,
}

/// Runs the per-document reconciliation over the entire collection.
///
/// Documents are consumed lazily page by page; the user and tag
/// directories are fetched once and shared across the pass, so a tag
/// created for one document is reused by every later document with the
/// same owner.
pub struct SyncEngine {
    reconciler: Reconciler,
}

impl SyncEngine {
    #[must_use]
    pub fn new(reconciler: Reconciler) -> Self {
        Self { reconciler }
    }

    /// Reconcile every document in the instance.
    ///
    /// A failure of any of the initial fetches (first document page, users,
    /// tags) aborts the pass and returns all-zero stats. A page fetch
    /// failure mid-pass stops the pass and returns the counts accrued so
    /// far.
    pub async fn full_sync(&self) -> SyncStats {
        info!("Starting full sync of all documents");

        let client = self.reconciler.client();

        let users = match client.list_users().await {
            Ok(users) => user_directory(&users),
            Err(e) => {
                error!(error = %e, "Full sync aborted: could not fetch users");
                return SyncStats::default();
            }
        };

        let mut tags = match client.list_tags().await {
            Ok(tags) => tag_directory(&tags),
            Err(e) => {
                error!(error = %e, "Full sync aborted: could not fetch tags");
                return SyncStats::default();
            }
        };

        let first_page = match client.documents_page(None).await {
            Ok(page) => page,
            Err(e) => {
                error!(error = %e, "Full sync aborted: could not fetch documents");
                return SyncStats::default();
            }
        };

        let mut stats = SyncStats {
            total: first_page.count,
            ..SyncStats::default()
        };
        info!(total = stats.total, "Found documents to process");

        let mut page = first_page;
        loop {
            for document in &page.results {
                stats.processed += 1;

                let outcome = self
                    .reconciler
                    .ensure_owner_tag(document, &users, &mut tags)
                    .await;

                if outcome.is_success() {
                    stats.succeeded += 1;
                } else {
                    stats.failed += 1;
                }

                if matches!(outcome, ReconcileOutcome::Updated { .. }) {
                    tokio::time::sleep(INTER_REQUEST_DELAY).await;
                }
            }

            let Some(next) = page.next else { break };

            tokio::time::sleep(INTER_REQUEST_DELAY).await;
            page = match client.documents_page(Some(&next)).await {
                Ok(page) => page,
                Err(e) => {
                    error!(error = %e, "Full sync stopped early: page fetch failed");
                    break;
                }
            };
        }

        info!(
            total = stats.total,
            processed = stats.processed,
            succeeded = stats.succeeded,
            failed = stats.failed,
            "Full sync completed"
        );
        stats
    }
}
