//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcast handle that stops a running server.
///
/// The server subscribes before it starts serving; tests trigger it instead of sending Ctrl+C.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Signal every subscriber. Returns false if nobody was listening.
    pub fn trigger(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve on Ctrl+C or when `rx` fires (or its sender is dropped).
pub async fn wait_for_shutdown(mut rx: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                // Fall back to the broadcast handle alone.
                let _ = rx.recv().await;
            }
        }
        _ = rx.recv() => {}
    }
    tracing::info!("Shutdown signal received");
}
