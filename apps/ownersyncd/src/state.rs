//! Shared application state for the webhook handlers.

use paperless_ownersync::Reconciler;
use std::sync::Arc;
use std::time::Duration;

/// State handed to every webhook request.
#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<Reconciler>,
    /// Pause before reconciling a freshly notified document, giving
    /// Paperless time to finish its own post-processing.
    pub settle_delay: Duration,
}

impl AppState {
    pub fn new(reconciler: Reconciler, settle_delay: Duration) -> Self {
        Self {
            reconciler: Arc::new(reconciler),
            settle_delay,
        }
    }
}
