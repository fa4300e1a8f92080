//! Shared application state: the installed snapshot store with degraded
//! mode, the live-match registry, the deferred-save queue, and the score
//! feed.

/// Score feed broadcast hub.
pub mod feed;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, RwLock, watch};
use uuid::Uuid;

use crate::{
    config::ScoringConfig,
    dao::{match_store::MatchStore, models::MatchSnapshotEntity},
    engine::MatchState,
    error::ServiceError,
};

pub use self::feed::{FeedEvent, ScoreFeed};

/// Cheaply cloneable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Broadcast capacity of the score feed.
pub const FEED_CAPACITY: usize = 16;

/// Central application state shared by all services.
///
/// Each live match sits behind its own async mutex, which is what
/// serializes scoring strictly per match id.
pub struct AppState {
    config: ScoringConfig,
    store: RwLock<Option<Arc<dyn MatchStore>>>,
    degraded: watch::Sender<bool>,
    feed: ScoreFeed,
    matches: DashMap<Uuid, Arc<Mutex<MatchState>>>,
    pending_saves: DashMap<Uuid, MatchSnapshotEntity>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be
    /// cloned cheaply.
    ///
    /// The application starts in degraded mode until a store is installed.
    pub fn new(config: ScoringConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            config,
            store: RwLock::new(None),
            degraded: degraded_tx,
            feed: ScoreFeed::new(FEED_CAPACITY),
            matches: DashMap::new(),
            pending_saves: DashMap::new(),
        })
    }

    /// The immutable runtime configuration.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Obtain a handle to the current snapshot store, if one is installed.
    pub async fn match_store(&self) -> Option<Arc<dyn MatchStore>> {
        let guard = self.store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the snapshot store or fail with [`ServiceError::Degraded`].
    pub async fn require_match_store(&self) -> Result<Arc<dyn MatchStore>, ServiceError> {
        self.match_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a snapshot store implementation and leave degraded mode.
    pub async fn install_match_store(&self, store: Arc<dyn MatchStore>) {
        {
            let mut guard = self.store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the current snapshot store and enter degraded mode.
    pub async fn clear_match_store(&self) {
        {
            let mut guard = self.store.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            let changed = *current != value;
            *current = value;
            changed
        });
    }

    /// Broadcast hub for outbound score updates.
    pub fn feed(&self) -> &ScoreFeed {
        &self.feed
    }

    /// Register a live match, returning its serialization handle.
    pub fn register_match(&self, state: MatchState) -> Arc<Mutex<MatchState>> {
        let id = state.id;
        let handle = Arc::new(Mutex::new(state));
        self.matches.insert(id, handle.clone());
        handle
    }

    /// Handle of a registered live match.
    pub fn live_match(&self, id: Uuid) -> Option<Arc<Mutex<MatchState>>> {
        self.matches.get(&id).map(|entry| entry.value().clone())
    }

    /// Drop a match from the registry; returns whether it was present.
    pub fn unregister_match(&self, id: Uuid) -> bool {
        self.matches.remove(&id).is_some()
    }

    /// Queue a snapshot whose save failed, replacing any older one for the
    /// same match. The storage supervisor drains this queue.
    pub fn queue_deferred_save(&self, snapshot: MatchSnapshotEntity) {
        self.pending_saves.insert(snapshot.id, snapshot);
    }

    /// Put a snapshot back after a failed retry, unless a fresher one has
    /// been queued for the same match in the meantime.
    pub fn requeue_deferred_save(&self, snapshot: MatchSnapshotEntity) {
        self.pending_saves.entry(snapshot.id).or_insert(snapshot);
    }

    /// Take every queued snapshot, leaving the queue empty.
    pub fn take_deferred_saves(&self) -> Vec<MatchSnapshotEntity> {
        let ids: Vec<Uuid> = self
            .pending_saves
            .iter()
            .map(|entry| *entry.key())
            .collect();
        ids.into_iter()
            .filter_map(|id| self.pending_saves.remove(&id).map(|(_, snapshot)| snapshot))
            .collect()
    }

    /// Number of snapshots waiting for a retry.
    pub fn deferred_save_count(&self) -> usize {
        self.pending_saves.len()
    }
}
