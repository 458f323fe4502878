use actix_web::dev::ServerHandle;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ledger::LedgerService;

/// Flush the ledger every `every` until `stop` fires. A failed flush is
/// logged and retried on the next tick.
pub async fn save_periodically(
    ledger: Arc<LedgerService>,
    every: Duration,
    stop: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = stop.cancelled() => break,
            _ = tokio::time::sleep(every) => {}
        }
        if stop.is_cancelled() {
            break;
        }
        let ledger = ledger.clone();
        match tokio::task::spawn_blocking(move || ledger.flush()).await {
            Ok(Ok(())) => debug!("periodic save done"),
            Ok(Err(e)) => warn!("periodic save failed, retrying next interval: {e}"),
            Err(e) => warn!("periodic save task panicked: {e}"),
        }
    }
    debug!("periodic saver stopped");
}

/// Resolve on SIGINT or SIGTERM.
pub async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                warn!("cannot listen for SIGTERM ({e}); waiting for Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Shutdown sequence: stop the saver and any proof search, flush state,
/// give the saver `timeout` to exit, then stop the HTTP server.
pub async fn shutdown(
    ledger: Arc<LedgerService>,
    saver: JoinHandle<()>,
    timeout: Duration,
    server: ServerHandle,
) {
    info!("signal received, shutting down gracefully...");
    ledger.shutdown_token().cancel();

    let flushing = ledger.clone();
    match tokio::task::spawn_blocking(move || flushing.flush()).await {
        Ok(Ok(())) => info!("ledger flushed"),
        Ok(Err(e)) => error!("final flush failed: {e}"),
        Err(e) => error!("final flush task panicked: {e}"),
    }

    if tokio::time::timeout(timeout, saver).await.is_err() {
        warn!("periodic saver still running after {timeout:?}");
    }

    server.stop(true).await;
    info!("shutdown complete");
}
