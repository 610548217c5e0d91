//! Interrupt flag shared between the signal handler and the fetcher

use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Set once, never reset. Clones observe the same flag.
#[derive(Debug, Clone)]
pub struct CancellationToken(Arc<watch::Sender<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(watch::Sender::new(false)))
    }

    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    pub fn cancel(&self) {
        self.0.send_replace(true);
        debug!("Cancellation requested");
    }

    /// Completes when [`cancel`](Self::cancel) has been called on any clone
    pub async fn cancelled(&self) {
        let mut rx = self.0.subscribe();
        // The sender lives as long as `self`, so the channel cannot close here.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
