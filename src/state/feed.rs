//! Broadcast hub fanning score updates out to presentation subscribers.

use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

use crate::dto::score::ScoreUpdatePayload;

/// Event dispatched on the score feed.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// Fresh score line after an applied event.
    ScoreUpdate {
        /// Match the update belongs to.
        match_id: Uuid,
        /// The projected payload.
        payload: ScoreUpdatePayload,
    },
    /// A match reached its result.
    MatchCompleted {
        /// Match that finished.
        match_id: Uuid,
        /// Final result line.
        result: String,
    },
}

/// Simple broadcast hub wrapper used by the scoring services.
///
/// Delivery is best effort: a hub with no subscribers drops events, and a
/// lagging subscriber misses the oldest ones. Presentation layers re-read
/// the persisted snapshot when they fall behind.
pub struct ScoreFeed {
    sender: broadcast::Sender<FeedEvent>,
}

impl ScoreFeed {
    /// Construct a hub backed by a Tokio broadcast channel of `capacity`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a subscriber that will receive subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.sender.subscribe()
    }

    /// Subscribe as a [`futures::Stream`](futures::Stream) of events.
    pub fn stream(&self) -> BroadcastStream<FeedEvent> {
        BroadcastStream::new(self.subscribe())
    }

    /// Send an event to all current subscribers, ignoring delivery errors.
    pub fn broadcast(&self, event: FeedEvent) {
        let _ = self.sender.send(event);
    }
}
