//! Paperless-ngx owner-tag sync daemon.
//!
//! Keeps each document tagged with a tag derived from its owner, either by
//! reacting to webhook notifications, by periodic full reconciliation, or
//! both.

use ownersyncd::config::{Config, RunMode};
use ownersyncd::scheduler::Scheduler;
use ownersyncd::state::AppState;
use ownersyncd::{logging, routes};
use paperless_api::{ApiToken, PaperlessClient};
use paperless_ownersync::{OwnerTagMapping, Reconciler, SyncEngine, TagPolicy};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Pause between a webhook notification and the reconciliation read,
/// tolerating Paperless's own asynchronous post-processing.
const WEBHOOK_SETTLE_DELAY: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.log_filter);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = %config.mode,
        url = %config.base_url,
        "Starting paperless owner-tag sync"
    );

    let mapping = OwnerTagMapping::load(&config.mapping_file);

    let client = match PaperlessClient::new(&config.base_url, ApiToken::new(config.token.clone())) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to build API client: {e}");
            std::process::exit(1);
        }
    };

    // Refuse to start against an unreachable or misconfigured instance.
    if let Err(e) = client.check_connection().await {
        eprintln!("Failed to connect to Paperless at {}: {e}", config.base_url);
        std::process::exit(1);
    }
    info!(url = %config.base_url, "Connected to Paperless");

    let policy = TagPolicy::new(&config.tag_prefix, mapping);
    let reconciler = Reconciler::new(client, policy);
    let shutdown = CancellationToken::new();

    match config.mode {
        RunMode::Webhook => {
            serve_webhook(&config, reconciler, shutdown).await;
        }
        RunMode::Schedule => {
            let sched = Scheduler::new(
                SyncEngine::new(reconciler),
                Duration::from_secs(config.sync_interval_hours * 3600),
                true,
            );
            let handle = tokio::spawn(sched.run(shutdown.clone()));

            wait_for_signal().await;
            info!("Shutdown signal received");
            shutdown.cancel();
            if let Err(e) = handle.await {
                error!(error = %e, "Scheduler task failed");
            }
        }
        RunMode::Hybrid => {
            let sched = Scheduler::new(
                SyncEngine::new(reconciler.clone()),
                Duration::from_secs(config.sync_interval_hours * 3600),
                false,
            );
            let handle = tokio::spawn(sched.run(shutdown.clone()));
            info!(
                interval_hours = config.sync_interval_hours,
                "Periodic full sync enabled"
            );

            serve_webhook(&config, reconciler, shutdown.clone()).await;

            shutdown.cancel();
            if let Err(e) = handle.await {
                error!(error = %e, "Scheduler task failed");
            }
        }
    }

    info!("Shutdown complete");
}

/// Bind and run the webhook server until a shutdown signal arrives.
async fn serve_webhook(config: &Config, reconciler: Reconciler, shutdown: CancellationToken) {
    let app = routes::app_router(AppState::new(reconciler, WEBHOOK_SETTLE_DELAY));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind webhook server to {addr}: {e}");
            std::process::exit(1);
        }
    };
    info!(addr = %addr, "Webhook server listening");

    let graceful = async move {
        wait_for_signal().await;
        info!("Shutdown signal received");
        shutdown.cancel();
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(graceful)
        .await
    {
        error!(error = %e, "Webhook server error");
        std::process::exit(1);
    }
}

/// Wait for Ctrl-C or SIGTERM.
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
