//! Single-document owner-tag reconciliation.
//!
//! The reconciler computes the target tag for a document's owner and
//! applies the minimal change: nothing, create-then-attach, or attach.
//! Side effects are strictly additive — existing tag ids are always
//! preserved and nothing is ever removed.
//!
//! Concurrency note: the tag update is a full-list PATCH, so two
//! reconciliations of the same document racing each other can lose one
//! update. Paperless offers no partial add-tag operation on the documents
//! endpoint, and this is an accepted limitation.

use paperless_api::{Document, NewTag, PaperlessClient, Tag, User};
use std::collections::HashMap;
use tracing::{error, info, warn};

use crate::policy::TagPolicy;

/// Result of reconciling one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The owner tag was attached (created first if necessary).
    Updated { tag_name: String },
    /// The document already carried its owner tag.
    AlreadyTagged,
    /// No owner, or the owner id is not in the user directory. Not an
    /// error; the document is simply out of scope.
    NoOwner,
    /// The username has an explicit mapping entry but the mapped tag does
    /// not exist remotely. Mapped tags are operator configuration and are
    /// never auto-created.
    MappedTagMissing { tag_name: String },
    /// The remote API rejected tag creation.
    TagCreateFailed,
    /// The tag-list PATCH failed.
    UpdateFailed,
    /// The document (or a directory) could not be fetched.
    FetchFailed,
}

impl ReconcileOutcome {
    /// Whether this outcome counts as a success (converged or no-op).
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Updated { .. } | Self::AlreadyTagged | Self::NoOwner
        )
    }
}

/// Build the id → username directory from a user list.
#[must_use]
pub fn user_directory(users: &[User]) -> HashMap<u64, String> {
    users
        .iter()
        .map(|u| (u.id, u.username.clone()))
        .collect()
}

/// Build the name → id directory from a tag list.
#[must_use]
pub fn tag_directory(tags: &[Tag]) -> HashMap<String, u64> {
    tags.iter().map(|t| (t.name.clone(), t.id)).collect()
}

/// Applies the owner-tag rule to documents via the API client.
///
/// Holds the process-wide configuration (resolution policy) plus the client
/// handle; constructed once and shared by the webhook and scheduler paths.
#[derive(Debug, Clone)]
pub struct Reconciler {
    client: PaperlessClient,
    policy: TagPolicy,
}

impl Reconciler {
    #[must_use]
    pub fn new(client: PaperlessClient, policy: TagPolicy) -> Self {
        Self { client, policy }
    }

    #[must_use]
    pub fn client(&self) -> &PaperlessClient {
        &self.client
    }

    /// Reconcile a single document with fresh directory snapshots.
    ///
    /// This is the webhook path: the document, user directory, and tag
    /// directory are all fetched anew, so renames since the last call are
    /// picked up. Repeated calls converge and never duplicate a tag.
    pub async fn reconcile_document(&self, document_id: u64) -> ReconcileOutcome {
        info!(document_id, "Reconciling owner tag");

        let document = match self.client.get_document(document_id).await {
            Ok(doc) => doc,
            Err(e) => {
                error!(document_id, error = %e, "Could not fetch document");
                return ReconcileOutcome::FetchFailed;
            }
        };

        let users = match self.client.list_users().await {
            Ok(users) => user_directory(&users),
            Err(e) => {
                error!(document_id, error = %e, "Could not fetch users");
                return ReconcileOutcome::FetchFailed;
            }
        };

        let mut tags = match self.client.list_tags().await {
            Ok(tags) => tag_directory(&tags),
            Err(e) => {
                error!(document_id, error = %e, "Could not fetch tags");
                return ReconcileOutcome::FetchFailed;
            }
        };

        self.ensure_owner_tag(&document, &users, &mut tags).await
    }

    /// Apply the owner-tag decision to one document against the given
    /// directory snapshot.
    ///
    /// Shared by the single-document path (fresh snapshot) and the full
    /// sync (one snapshot for the whole pass). A tag created here is
    /// inserted into `tags` so later callers in the same pass reuse it.
    pub async fn ensure_owner_tag(
        &self,
        document: &Document,
        users: &HashMap<u64, String>,
        tags: &mut HashMap<String, u64>,
    ) -> ReconcileOutcome {
        let username = match document.owner.and_then(|id| users.get(&id)) {
            Some(username) => username,
            None => {
                info!(
                    document_id = document.id,
                    title = %document.title,
                    "Document has no valid owner, skipping"
                );
                return ReconcileOutcome::NoOwner;
            }
        };

        let resolved = self.policy.resolve(username);
        let tag_name = resolved.name();

        let tag_id = match tags.get(tag_name) {
            Some(&id) => id,
            None if resolved.is_mapped() => {
                warn!(
                    document_id = document.id,
                    username = %username,
                    tag_name,
                    "Mapped tag does not exist; refusing to auto-create an operator-mapped tag"
                );
                return ReconcileOutcome::MappedTagMissing {
                    tag_name: tag_name.to_string(),
                };
            }
            None => match self.client.create_tag(&NewTag::named(tag_name)).await {
                Ok(tag) => {
                    info!(tag_name, tag_id = tag.id, "Created owner tag");
                    tags.insert(tag.name, tag.id);
                    tag.id
                }
                Err(e) => {
                    error!(tag_name, error = %e, "Failed to create owner tag");
                    return ReconcileOutcome::TagCreateFailed;
                }
            },
        };

        if document.tags.contains(&tag_id) {
            info!(
                document_id = document.id,
                tag_name, "Document already has its owner tag"
            );
            return ReconcileOutcome::AlreadyTagged;
        }

        // Append to the existing set; the PATCH replaces the whole list, so
        // every current id must be carried over.
        let mut new_tags = document.tags.clone();
        new_tags.push(tag_id);

        match self.client.update_document_tags(document.id, new_tags).await {
            Ok(()) => {
                info!(
                    document_id = document.id,
                    title = %document.title,
                    tag_name,
                    "Attached owner tag"
                );
                ReconcileOutcome::Updated {
                    tag_name: tag_name.to_string(),
                }
            }
            Err(e) => {
                error!(
                    document_id = document.id,
                    error = %e,
                    "Failed to update document tags"
                );
                ReconcileOutcome::UpdateFailed
            }
        }
    }
}
