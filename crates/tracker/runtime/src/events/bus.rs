//! Broadcast bus delivering state updates to presentation layers.

use tokio::sync::broadcast;
use tracker_core::StateUpdate;

/// Fan-out channel for [`StateUpdate`] snapshots.
///
/// Presentation layers subscribe rather than being pushed into through
/// shared references. Publishing is best-effort: an update published with no
/// live subscribers is dropped, and a slow subscriber observes `Lagged`
/// instead of blocking the session.
pub struct EventBus {
    sender: broadcast::Sender<StateUpdate>,
}

impl EventBus {
    /// Creates a bus with the default buffer capacity.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a bus with the given per-subscriber buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Registers a new subscriber. Only updates published after this call
    /// are delivered to it.
    pub fn subscribe(&self) -> broadcast::Receiver<StateUpdate> {
        self.sender.subscribe()
    }

    /// Publishes an update to all current subscribers.
    pub fn publish(&self, update: StateUpdate) {
        let _ = self.sender.send(update);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
