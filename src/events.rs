//! View refresh signalling
//!
//! Every successful mutation announces which path has stale data so the
//! presentation layer can re-fetch. Events travel over a broadcast
//! channel; the HTTP layer exposes them as a server-sent event feed.

use serde::Serialize;
use tokio::sync::broadcast;

/// A "data changed for this path" notification
#[derive(Debug, Clone, Serialize)]
pub struct RefreshEvent {
    pub path: String,
}

/// Broadcast bus carrying refresh events to any number of subscribers
#[derive(Clone)]
pub struct RefreshBus {
    tx: broadcast::Sender<RefreshEvent>,
}

impl RefreshBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Announce that data under `path` changed. Lossy by design: with no
    /// subscribers the event is dropped, matching fire-and-forget
    /// invalidation semantics.
    pub fn emit(&self, path: &str) {
        let _ = self.tx.send(RefreshEvent {
            path: path.to_string(),
        });
        tracing::debug!("Refresh emitted for path: {}", path);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RefreshEvent> {
        self.tx.subscribe()
    }
}

impl Default for RefreshBus {
    fn default() -> Self {
        Self::new(crate::config::REFRESH_CHANNEL_CAPACITY)
    }
}
