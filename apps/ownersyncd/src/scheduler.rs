//! Periodic full-sync scheduler.

use paperless_ownersync::SyncEngine;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Fires a full sync on a fixed interval until cancelled.
///
/// Cancellation is observed between runs only: an in-flight sync always
/// finishes before the task exits.
pub struct Scheduler {
    engine: SyncEngine,
    period: Duration,
    /// Run one sync immediately at startup (schedule mode) instead of
    /// waiting a full period for the first tick.
    run_at_startup: bool,
}

impl Scheduler {
    pub fn new(engine: SyncEngine, period: Duration, run_at_startup: bool) -> Self {
        Self {
            engine,
            // tokio's interval rejects a zero period; one second is the
            // floor for a misconfigured caller.
            period: period.max(Duration::from_secs(1)),
            run_at_startup,
        }
    }

    pub async fn run(self, shutdown: CancellationToken) {
        info!(period_secs = self.period.as_secs(), "Scheduler started");

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the loop
        // below only wakes on real period boundaries.
        ticker.tick().await;

        if self.run_at_startup {
            info!("Running initial full sync");
            self.engine.full_sync().await;
        }

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Scheduler stopping");
                    break;
                }
                _ = ticker.tick() => {
                    info!("Running scheduled full sync");
                    self.engine.full_sync().await;
                }
            }
        }
    }
}
