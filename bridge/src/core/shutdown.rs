//! Graceful stop for the cycle driver
//!
//! Tasks subscribe to a `watch` flag and register their handles here. On
//! stop, the flag flips and registered tasks get [`SHUTDOWN_TIMEOUT_SECS`]
//! to finish the cycle they are in.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use super::constants::SHUTDOWN_TIMEOUT_SECS;

#[derive(Clone)]
pub struct ShutdownService {
    stop_tx: Arc<watch::Sender<bool>>,
    stop_rx: watch::Receiver<bool>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
    grace: Duration,
}

impl ShutdownService {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS))
    }

    /// Same as [`ShutdownService::new`] with a custom grace period
    pub fn with_timeout(grace: Duration) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        Self {
            stop_tx: Arc::new(stop_tx),
            stop_rx,
            tasks: Arc::new(Mutex::new(Vec::new())),
            grace,
        }
    }

    /// Track a task so `shutdown` waits for it
    pub async fn register(&self, handle: JoinHandle<()>) {
        self.tasks.lock().await.push(handle);
    }

    /// Receiver that flips to `true` once shutdown starts
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.stop_rx.clone()
    }

    pub fn trigger(&self) {
        self.stop_tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.stop_rx.borrow()
    }

    /// Future resolving once shutdown is triggered
    pub fn wait(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        let mut stop_rx = self.stop_rx.clone();
        async move {
            let _ = stop_rx.wait_for(|stopped| *stopped).await;
        }
    }

    /// Trigger, then wait for registered tasks up to the grace period.
    ///
    /// Returns `false` when the grace period ran out first.
    pub async fn shutdown(&self) -> bool {
        self.trigger();

        let tasks = std::mem::take(&mut *self.tasks.lock().await);
        tracing::debug!(tasks = tasks.len(), "Stopping background tasks");

        let finished = tokio::time::timeout(self.grace, join_all(tasks))
            .await
            .is_ok();
        if finished {
            tracing::debug!("Background tasks stopped");
        } else {
            tracing::warn!(
                grace_secs = self.grace.as_secs(),
                "Background tasks still running after grace period, exiting anyway"
            );
        }
        finished
    }

    /// Trigger shutdown on Ctrl+C or SIGTERM
    pub fn install_signal_handlers(&self) {
        let service = self.clone();
        tokio::spawn(async move {
            let signal = wait_for_signal().await;
            tracing::info!(signal, "Received signal, shutting down");
            service.trigger();
        });
    }
}

impl Default for ShutdownService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.expect("Failed to install Ctrl+C handler");
            "SIGINT"
        }
        _ = terminate.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    "Ctrl+C"
}
