//! Broadcast hub for registry notifications.

use roadledger_types::RegistryEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

/// Counters exposed for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventStats {
    /// Events emitted since the hub was created.
    pub emitted: u64,
    /// Currently attached subscribers.
    pub subscribers: usize,
}

/// Fan-out channel carrying [`RegistryEvent`]s to any number of
/// subscribers.
///
/// Delivery is best effort: an event emitted with zero subscribers is
/// still counted as emitted, and a lagging subscriber drops the oldest
/// events per the broadcast-channel contract.
#[derive(Debug)]
pub struct EventHub {
    sender: broadcast::Sender<RegistryEvent>,
    emitted: AtomicU64,
}

impl EventHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self {
            sender,
            emitted: AtomicU64::new(0),
        }
    }

    /// Attach a new subscriber. The receiver only observes events
    /// emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: RegistryEvent) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
        let _ = self.sender.send(event);
    }

    pub fn stats(&self) -> EventStats {
        EventStats {
            emitted: self.emitted.load(Ordering::Relaxed),
            subscribers: self.sender.receiver_count(),
        }
    }
}
